use urlencoding::encode;

use super::SubmissionAttempt;

const LINE_BREAK: &str = "%0D%0A";

/// Builds the `mailto:` link offered when the form endpoint can't be reached.
///
/// Field values are percent-encoded; the subject prefix is left as-is since mail
/// clients accept it raw.
pub fn mailto_link(to: &str, attempt: &SubmissionAttempt) -> String {
    let body = format!(
        "Name: {name}{br}Email: {email}{br}{br}Message:{br}{message}",
        name = encode(&attempt.name),
        email = encode(&attempt.email),
        message = encode(&attempt.message),
        br = LINE_BREAK,
    );
    format!(
        "mailto:{to}?subject=Portfolio Contact: {subject}&body={body}",
        subject = encode(&attempt.subject),
    )
}
