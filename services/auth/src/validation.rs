//! Request-body validation.
//!
//! Each endpoint names a [`RequestKind`]; its rule set runs over the raw JSON body
//! before the body is deserialized into the handler's typed request.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use otpgate_domain::mobile::{is_national_mobile_number, is_valid_country_code};
use otpgate_domain::user::Gender;

use crate::domain::types::OTP_LEN;
use crate::error::AuthServiceError;

pub const MOBILE_NUMBER_MISSING: &str = "Mobile number doesn't exists";
pub const MOBILE_NUMBER_LENGTH: &str = "Mobile number should be 10 digits";
pub const COUNTRY_CODE_MISSING: &str = "Country code doesn't exists";
pub const COUNTRY_CODE_INVALID: &str = "Country code should be a number between 1 and 999";
pub const OTP_DETAILS_MISSING: &str = "Otp details doesn't exists";
pub const OTP_ID_MISSING: &str = "Otp id doesn't exists";
pub const OTP_MISSING: &str = "OTP doesn't exists";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const GENDER_INVALID: &str = "Gender should be male or female";
pub const TITLE_MISSING: &str = "Title doesn't exists";
pub const PRIORITY_MISSING: &str = "Priority doesn't exists";
pub const BODY_NOT_OBJECT: &str = "Request body should be a JSON object";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    MobileAuth,
    VerifyOtp,
    UpdateProfile,
    CreateTask,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    MobileNumber,
    CountryCode,
    OtpDetails,
    Email,
    Gender,
    OptionalText(&'static str),
    RequiredText(&'static str, &'static str),
}

impl RequestKind {
    fn rules(self) -> &'static [Rule] {
        match self {
            Self::MobileAuth => &[Rule::MobileNumber, Rule::CountryCode],
            Self::VerifyOtp => &[Rule::MobileNumber, Rule::CountryCode, Rule::OtpDetails],
            Self::UpdateProfile => &[
                Rule::OptionalText("name"),
                Rule::Email,
                Rule::Gender,
                Rule::OptionalText("facebook"),
                Rule::OptionalText("linkedin"),
                Rule::OptionalText("instagram"),
            ],
            Self::CreateTask => &[
                Rule::RequiredText("title", TITLE_MISSING),
                Rule::RequiredText("priority", PRIORITY_MISSING),
                Rule::OptionalText("description"),
            ],
        }
    }

    /// Every rule violation in the body, in rule order.
    pub fn check(self, fields: &Map<String, Value>) -> Vec<String> {
        self.rules()
            .iter()
            .filter_map(|rule| rule.check(fields))
            .collect()
    }
}

impl Rule {
    fn check(self, fields: &Map<String, Value>) -> Option<String> {
        match self {
            Self::MobileNumber => match present(fields, "mobile_number") {
                None => Some(MOBILE_NUMBER_MISSING.to_owned()),
                Some(Value::String(s)) if is_national_mobile_number(s) => None,
                Some(_) => Some(MOBILE_NUMBER_LENGTH.to_owned()),
            },
            Self::CountryCode => match present(fields, "country_code") {
                None => Some(COUNTRY_CODE_MISSING.to_owned()),
                Some(v) if v.as_i64().is_some_and(is_valid_country_code) => None,
                Some(_) => Some(COUNTRY_CODE_INVALID.to_owned()),
            },
            Self::OtpDetails => match present(fields, "otp_details") {
                Some(Value::Object(details)) => {
                    let has_id = matches!(
                        present(details, "otp_id"),
                        Some(Value::String(s)) if !s.is_empty()
                    );
                    if !has_id {
                        Some(OTP_ID_MISSING.to_owned())
                    } else if !matches!(otp_value(details), Some(Value::String(_))) {
                        Some(OTP_MISSING.to_owned())
                    } else {
                        None
                    }
                }
                _ => Some(OTP_DETAILS_MISSING.to_owned()),
            },
            Self::Email => match present(fields, "email") {
                None => None,
                Some(Value::String(s)) if s.is_empty() || s.validate_email() => None,
                Some(_) => Some(EMAIL_INVALID.to_owned()),
            },
            Self::Gender => match present(fields, "gender") {
                None => None,
                Some(Value::String(s)) if s.is_empty() || s.parse::<Gender>().is_ok() => None,
                Some(_) => Some(GENDER_INVALID.to_owned()),
            },
            Self::OptionalText(field) => match present(fields, field) {
                None | Some(Value::String(_)) => None,
                Some(_) => Some(format!("{field} should be a string")),
            },
            Self::RequiredText(field, missing) => match present(fields, field) {
                Some(Value::String(_)) => None,
                None => Some(missing.to_owned()),
                Some(_) => Some(format!("{field} should be a string")),
            },
        }
    }
}

/// A field counts as absent when missing or `null`.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn otp_value(details: &Map<String, Value>) -> Option<&Value> {
    present(details, "OTP").or_else(|| present(details, "otp"))
}

/// Coerce loosely-typed inputs into the shapes the rules expect.
///
/// - numeric `mobile_number` becomes its decimal string
/// - digit-string `country_code` becomes a number
/// - numeric OTP becomes a zero-padded string of `OTP_LEN` digits
fn normalize(fields: &mut Map<String, Value>) {
    if let Some(v) = fields.get_mut("mobile_number") {
        if let Some(n) = v.as_u64() {
            *v = Value::String(n.to_string());
        }
    }
    if let Some(v) = fields.get_mut("country_code") {
        if let Some(n) = v.as_str().and_then(|s| s.trim().parse::<i64>().ok()) {
            *v = Value::from(n);
        }
    }
    if let Some(Value::Object(details)) = fields.get_mut("otp_details") {
        for key in ["OTP", "otp"] {
            if let Some(v) = details.get_mut(key) {
                if let Some(n) = v.as_u64() {
                    *v = Value::String(format!("{n:0width$}", width = OTP_LEN));
                }
            }
        }
    }
}

/// Validate `body` against the rules of `kind` and deserialize it.
pub fn parse<T: DeserializeOwned>(
    kind: RequestKind,
    mut body: Value,
) -> Result<T, AuthServiceError> {
    let Some(fields) = body.as_object_mut() else {
        return Err(AuthServiceError::Validation(vec![BODY_NOT_OBJECT.to_owned()]));
    };
    normalize(fields);

    let errors = kind.check(fields);
    if !errors.is_empty() {
        return Err(AuthServiceError::Validation(errors));
    }

    serde_json::from_value(body).map_err(|e| AuthServiceError::Validation(vec![e.to_string()]))
}
