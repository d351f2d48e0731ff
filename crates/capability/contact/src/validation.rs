use crate::{ContactError, ContactSubmission};
use domain::is_valid_email;

const MAX_MESSAGE_LEN: usize = 5000;

/// 去除首尾空白；空串视为未填写。
pub fn normalize_reference(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

pub(crate) fn check_fields(submission: &ContactSubmission) -> Result<(), ContactError> {
    if submission.name.trim().is_empty() {
        return Err(ContactError::InvalidInput("Name is required".to_string()));
    }
    if !is_valid_email(&submission.email) {
        return Err(ContactError::InvalidInput(
            "A valid email address is required".to_string(),
        ));
    }
    let message = submission.message.trim();
    if message.is_empty() {
        return Err(ContactError::InvalidInput("Message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(ContactError::InvalidInput(format!(
            "Message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reference_counts_as_missing() {
        assert_eq!(normalize_reference(None), None);
        assert_eq!(normalize_reference(Some("   ")), None);
        assert_eq!(
            normalize_reference(Some(" BK1761629662783i7bw7dtsz ")),
            Some("BK1761629662783i7bw7dtsz".to_string())
        );
    }
}
