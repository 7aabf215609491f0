use crate::errors::AppError;
use crate::models::profile::ProfileInput;
use crate::text::extract_email;

pub const MISSING_FIELDS: &str = "Please fill in all required fields.";

/// Trims every field and checks the required ones.
///
/// name, qualification and experience must be non-blank; email, when given, must be
/// a single well-formed address.
pub fn validate_profile(input: ProfileInput) -> Result<ProfileInput, AppError> {
    let input = ProfileInput {
        name: input.name.trim().to_string(),
        qualification: input.qualification.trim().to_string(),
        experience: input.experience.trim().to_string(),
        skills: input.skills.trim().to_string(),
        email: input.email.trim().to_string(),
    };

    if input.name.is_empty() || input.qualification.is_empty() || input.experience.is_empty() {
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
    }

    if !input.email.is_empty() && extract_email(&input.email).as_deref() != Some(input.email.as_str())
    {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            input.email
        )));
    }

    Ok(input)
}
