use std::borrow::Cow;
use tessera_derive::tessera_error;

#[tessera_error]
pub enum SampleError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn failing_io() -> Result<(), std::io::Error> {
    Err(std::io::Error::other("disk gone"))
}

#[test]
fn source_errors_convert_with_question_mark() {
    fn run() -> Result<(), SampleError> {
        failing_io()?;
        Ok(())
    }

    let err = run().expect_err("io error should propagate");
    assert!(matches!(err, SampleError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "IO error: disk gone");
}

#[test]
fn context_is_rendered_in_display() {
    let err = failing_io().context("Loading manifest").expect_err("io error should propagate");
    assert_eq!(err.to_string(), "IO error (Loading manifest): disk gone");
}

#[test]
fn context_can_be_attached_to_own_results() {
    let result: Result<(), SampleError> = Err("broken invariant".into());
    let err = result.context("while enrolling").expect_err("error expected");

    assert_eq!(err.to_string(), "Internal error (while enrolling): broken invariant");
}

#[test]
fn owned_strings_become_internal_errors() {
    let err = SampleError::from(format!("code {}", 7));
    assert!(matches!(err, SampleError::Internal { ref message, .. } if message == "code 7"));
}
