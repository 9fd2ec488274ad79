// --- File: crates/coderelay_relay/src/logic.rs ---

use coderelay_common::ValidationError;
use coderelay_config::{DestinationConfig, RelayConfig};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{CustomParam, OutboundPayload, Receiver, VerificationRequest};

/// International number: optional `+`, no leading zero, 8 to 15 ASCII digits in total.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{7,14}$").expect("phone pattern is a valid regex"));

pub const AUTH_CODE_MIN_LEN: usize = 4;
pub const AUTH_CODE_MAX_LEN: usize = 16;

/// Name of the template parameter that carries the code.
pub const CODE_PARAM_NAME: &str = "1";

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::PhoneInvalid)
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_auth_code(auth_code: &str) -> Result<(), ValidationError> {
    let len = auth_code.chars().count();
    if (AUTH_CODE_MIN_LEN..=AUTH_CODE_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::AuthCodeLength { len })
    }
}

impl VerificationRequest {
    /// Body shape first, then the phone pattern.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_auth_code(&self.auth_code)?;
        validate_phone(&self.phone)
    }
}

/// Destinations expect the number without the international `+`.
pub fn receiver_number(phone: &str) -> &str {
    phone.strip_prefix('+').unwrap_or(phone)
}

pub fn build_payload(
    request: &VerificationRequest,
    destination: &DestinationConfig,
    relay: &RelayConfig,
) -> OutboundPayload {
    OutboundPayload {
        template_name: relay.template_name.clone(),
        broadcast_name: relay.broadcast_name.clone(),
        receivers: vec![Receiver {
            whatsapp_number: receiver_number(&request.phone).to_string(),
            custom_params: vec![CustomParam {
                name: CODE_PARAM_NAME.to_string(),
                value: request.auth_code.clone(),
            }],
        }],
        channel_number: destination.channel.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(phone: &str, code: &str) -> VerificationRequest {
        VerificationRequest {
            phone: phone.to_string(),
            auth_code: code.to_string(),
        }
    }

    #[test]
    fn test_valid_phones() {
        for phone in [
            "+14155552671",
            "14155552671",
            "12345678",        // 8 digits, shortest accepted
            "+123456789012345", // 15 digits, longest accepted
            "+5215512345678",
        ] {
            assert!(validate_phone(phone).is_ok(), "{} should be accepted", phone);
        }
    }

    #[test]
    fn test_invalid_phones() {
        for phone in [
            "",
            "+",
            "0123",
            "123",
            "1234567",           // 7 digits
            "1234567890123456",  // 16 digits
            "+0123456789",       // leading zero
            "++14155552671",
            "+1 415 555 2671",
            "+1-415-555-2671",
            "14155552671a",
            "１４１５５５５２６７１", // full-width digits
            "+1４１５５５５２６７１",
            " 14155552671",
            "14155552671\n",
        ] {
            assert_eq!(
                validate_phone(phone),
                Err(ValidationError::PhoneInvalid),
                "{:?} should be rejected",
                phone
            );
        }
    }

    #[test]
    fn test_auth_code_bounds() {
        assert!(validate_auth_code("1234").is_ok());
        assert!(validate_auth_code("1234567890123456").is_ok());
        assert_eq!(
            validate_auth_code("123"),
            Err(ValidationError::AuthCodeLength { len: 3 })
        );
        assert_eq!(
            validate_auth_code("12345678901234567"),
            Err(ValidationError::AuthCodeLength { len: 17 })
        );
        // four characters, more than four bytes
        assert!(validate_auth_code("ñáéí").is_ok());
    }

    #[test]
    fn test_request_validation_checks_code_before_phone() {
        assert_eq!(
            request("0123", "12").validate(),
            Err(ValidationError::AuthCodeLength { len: 2 })
        );
        assert_eq!(
            request("0123", "8842").validate(),
            Err(ValidationError::PhoneInvalid)
        );
        assert!(request("+14155552671", "8842").validate().is_ok());
    }

    #[test]
    fn test_receiver_number_strips_only_leading_plus() {
        assert_eq!(receiver_number("+14155552671"), "14155552671");
        assert_eq!(receiver_number("14155552671"), "14155552671");
    }

    #[test]
    fn test_build_payload_shape() {
        let destination = DestinationConfig::new("https://a.example/send", "tok", "5215500000000");
        let payload = build_payload(
            &request("+14155552671", "8842"),
            &destination,
            &RelayConfig::default(),
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "template_name": "codigo_de_verificacion",
                "broadcast_name": "codigo_de_verificacion",
                "receivers": [{
                    "whatsappNumber": "14155552671",
                    "customParams": [{ "name": "1", "value": "8842" }]
                }],
                "channel_number": "5215500000000"
            })
        );
    }

    #[test]
    fn test_build_payload_uses_configured_template() {
        let relay = RelayConfig {
            template_name: "otp_es".to_string(),
            broadcast_name: "otp_broadcast".to_string(),
            ..RelayConfig::default()
        };
        let destination = DestinationConfig::new("https://a.example/send", "tok", "1");
        let payload = build_payload(&request("14155552671", "0000"), &destination, &relay);

        assert_eq!(payload.template_name, "otp_es");
        assert_eq!(payload.broadcast_name, "otp_broadcast");
        assert_eq!(payload.receivers[0].whatsapp_number, "14155552671");
    }
}
