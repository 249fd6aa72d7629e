//! Local checks run on every request body before it is sent

use crate::error::{ApiError, ApiResult};
use crate::models::{
    Category, ChangePasswordRequest, CreateEventRequest, EventRegistrationRequest,
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, VerifyOtpRequest,
};
use eventmanager_core::validation::{ValidationResult, Validator};

/// Shortest accepted password
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Digits in a password-reset code
pub const OTP_LENGTH: usize = 6;

const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Request bodies that can be checked before sending
pub trait Validate {
    /// Collect every problem with the request
    fn check(&self) -> ValidationResult;

    /// `Ok` when there are no problems, else one `ApiError::Validation`
    /// listing all of them
    fn validate(&self) -> ApiResult<()> {
        let result = self.check();
        if result.is_valid() {
            Ok(())
        } else {
            Err(ApiError::validation(result.summary()))
        }
    }
}

impl Validate for LoginRequest {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("email", &self.email)
            .email("email", &self.email)
            .required("password", &self.password)
            .validate()
    }
}

impl Validate for RegisterRequest {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("name", &self.name)
            .required("email", &self.email)
            .email("email", &self.email)
            .required("password", &self.password)
            .min_length("password", &self.password, MIN_PASSWORD_LENGTH)
            .required("confirm_password", &self.confirm_password)
            .equals("confirm_password", &self.confirm_password, &self.password, PASSWORD_MISMATCH)
            .validate()
    }
}

impl Validate for ForgotPasswordRequest {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("email", &self.email)
            .email("email", &self.email)
            .validate()
    }
}

impl Validate for VerifyOtpRequest {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("email", &self.email)
            .email("email", &self.email)
            .digits("otp", &self.otp, OTP_LENGTH)
            .validate()
    }
}

impl Validate for ResetPasswordRequest {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("email", &self.email)
            .email("email", &self.email)
            .digits("otp", &self.otp, OTP_LENGTH)
            .required("new_password", &self.new_password)
            .min_length("new_password", &self.new_password, MIN_PASSWORD_LENGTH)
            .equals(
                "confirm_password",
                &self.confirm_password,
                &self.new_password,
                PASSWORD_MISMATCH,
            )
            .validate()
    }
}

impl Validate for ChangePasswordRequest {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("old_password", &self.old_password)
            .required("new_password", &self.new_password)
            .min_length("new_password", &self.new_password, MIN_PASSWORD_LENGTH)
            .required("confirm_password", &self.confirm_password)
            .equals(
                "confirm_password",
                &self.confirm_password,
                &self.new_password,
                PASSWORD_MISMATCH,
            )
            .validate()
    }
}

impl Validate for CreateEventRequest {
    fn check(&self) -> ValidationResult {
        let mut validator = Validator::new()
            .required("title", &self.title)
            .max_length("title", &self.title, 200)
            .required("description", &self.description)
            .required("date", &self.date)
            .date("date", &self.date)
            .required("time", &self.time)
            .time("time", &self.time)
            .required("location", &self.location)
            .max_length("location", &self.location, 200)
            .required("category", &self.category)
            .range("max_participants", self.max_participants, 1, i64::from(i32::MAX));

        if !self.category.trim().is_empty() {
            validator =
                validator.one_of_ignore_case("category", &self.category, &Category::names());
        }

        validator.validate()
    }
}

impl CreateEventRequest {
    /// Copy with trimmed fields and a lowercase category
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            category: self.category.trim().to_lowercase(),
            max_participants: self.max_participants,
        }
    }
}

impl Validate for EventRegistrationRequest {
    fn check(&self) -> ValidationResult {
        Validator::new()
            .required("name", &self.name)
            .required("email", &self.email)
            .email("email", &self.email)
            .required("phone", &self.phone)
            .max_length("phone", &self.phone, 20)
            .required("student_id", &self.student_id)
            .max_length("student_id", &self.student_id, 50)
            .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> CreateEventRequest {
        CreateEventRequest {
            title: "Career Fair".to_string(),
            description: "Meet employers".to_string(),
            date: "2025-12-15".to_string(),
            time: "10:00".to_string(),
            location: "Main Hall".to_string(),
            category: "Academic".to_string(),
            ..CreateEventRequest::default()
        }
    }

    #[test]
    fn test_register_collects_all_errors() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            name: String::new(),
            password: "abc".to_string(),
            confirm_password: "abd".to_string(),
            role: None,
        };
        let result = request.check();
        assert!(result.has_error("name"));
        assert!(result.has_error("email"));
        assert!(result.has_error("password"));
        assert!(result.has_error("confirm_password"));
        assert!(matches!(request.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_login_ok() {
        let request = LoginRequest {
            email: "ali@uni.edu".to_string(),
            password: "x".to_string(),
            role: crate::models::Role::Student,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_otp_must_be_six_digits() {
        let request = VerifyOtpRequest {
            email: "ali@uni.edu".to_string(),
            otp: "12345".to_string(),
        };
        assert!(request.check().has_error("otp"));
    }

    #[test]
    fn test_reset_password_mismatch() {
        let request = ResetPasswordRequest {
            email: "ali@uni.edu".to_string(),
            otp: "123456".to_string(),
            new_password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("Passwords do not match"));
    }

    #[test]
    fn test_event_valid_and_normalized() {
        let request = event();
        assert!(request.validate().is_ok());
        assert_eq!(request.normalized().category, "academic");
    }

    #[test]
    fn test_event_bad_fields() {
        let request = CreateEventRequest {
            date: "2025-02-30".to_string(),
            time: "7pm".to_string(),
            category: "music".to_string(),
            max_participants: 0,
            ..event()
        };
        let result = request.check();
        assert!(result.has_error("date"));
        assert!(result.has_error("time"));
        assert!(result.has_error("category"));
        assert!(result.has_error("max_participants"));
        assert_eq!(result.errors().len(), 4);
    }

    #[test]
    fn test_event_registration_requires_details() {
        let request = EventRegistrationRequest {
            name: "Sara".to_string(),
            email: "sara@uni.edu".to_string(),
            phone: " ".to_string(),
            student_id: String::new(),
        };
        let result = request.check();
        assert!(result.has_error("phone"));
        assert!(result.has_error("student_id"));
        assert!(!result.has_error("email"));
    }
}
