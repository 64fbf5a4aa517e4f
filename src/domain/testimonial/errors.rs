#[derive(Debug, thiserror::Error)]
pub enum TestimonialError {
    #[error("Testimonial {0} cannot be empty")]
    MissingField(&'static str),
}
