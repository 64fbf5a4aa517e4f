// ============================================================================
// Static Admin Pages
// ============================================================================
//
// Plain HTML forms for the admin screens. Record views are served as JSON.
//
// ============================================================================

pub const LOGIN_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><title>Admin login</title></head>
<body>
  <h1>Admin login</h1>
  <form method="post" action="/login">
    <label>Username <input type="text" name="username"></label>
    <label>Password <input type="password" name="password"></label>
    <button type="submit">Log in</button>
  </form>
</body>
</html>
"#;

pub const ADMIN_VIEW: &str = r#"<!DOCTYPE html>
<html>
<head><title>Admin</title></head>
<body>
  <h1>Site administration</h1>
  <ul>
    <li><a href="/addEvent">Add event</a></li>
    <li><a href="/viewEvents">Events</a></li>
    <li><a href="/admin/addTestimonial">Add testimonial</a></li>
    <li><a href="/admin/viewTestimonial">Testimonials</a></li>
    <li><a href="/viewEmails">Newsletter subscribers</a></li>
  </ul>
  <form method="post" action="/logout"><button type="submit">Log out</button></form>
</body>
</html>
"#;

pub const ADD_EVENT_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><title>Add event</title></head>
<body>
  <h1>Add event</h1>
  <form method="post" action="/addEvent" enctype="multipart/form-data">
    <label>Title <input type="text" name="title"></label>
    <label>Description <textarea name="description"></textarea></label>
    <label>Date <input type="date" name="date"></label>
    <label>Image <input type="file" name="eventImage" accept="image/*"></label>
    <button type="submit">Save</button>
  </form>
</body>
</html>
"#;

pub const ADD_TESTIMONIAL_FORM: &str = r#"<!DOCTYPE html>
<html>
<head><title>Add testimonial</title></head>
<body>
  <h1>Add testimonial</h1>
  <form method="post" action="/admin/addTestimonial" enctype="multipart/form-data">
    <label>Name <input type="text" name="name"></label>
    <label>Testimonial <textarea name="description"></textarea></label>
    <label>Photo <input type="file" name="testimonialImage" accept="image/*"></label>
    <button type="submit">Save</button>
  </form>
</body>
</html>
"#;
