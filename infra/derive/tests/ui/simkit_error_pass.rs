use simkit_derive::simkit_error;
use std::borrow::Cow;

#[simkit_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Model `{model}` failed{}: {source}", format_context(.context))]
    Model { model: String, source: std::fmt::Error, context: Option<Cow<'static, str>> },

    #[error("Lifecycle violation{}: {message}", format_context(.context))]
    LifecycleViolation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    Ok(std::fs::read_to_string("missing.txt").context("reading")?)
}

fn main() {
    let err = DemoError::lifecycle_violation("configure() called twice");
    assert!(err.to_string().contains("configure() called twice"));
    let err: DemoError = "boom".into();
    assert!(matches!(err, DemoError::Internal { .. }));
    let model = DemoError::Model { model: "road".to_owned(), source: std::fmt::Error, context: None };
    assert!(model.to_string().contains("road"));
    let _ = read();
}
