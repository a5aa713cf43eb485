//! Deep links into WhatsApp chats with providers and support.

pub mod handlers;

const DEFAULT_COUNTRY_CODE: &str = "+966";

/// Width of every phone column.
pub const MAX_PHONE_LEN: usize = 20;
const MIN_PHONE_LEN: usize = 5;

/// Keeps digits and `+`. Numbers without a country code are treated as local
/// Saudi numbers: one leading trunk `0` is dropped and `+966` prefixed.
pub fn normalize_phone(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if cleaned.starts_with('+') {
        return cleaned;
    }

    let local = cleaned.strip_prefix('0').unwrap_or(&cleaned);
    format!("{}{}", DEFAULT_COUNTRY_CODE, local)
}

/// The normalised number, if it still fits a phone column and has more than a prefix.
pub fn storable_phone(raw: &str) -> Option<String> {
    let phone = normalize_phone(raw);
    (MIN_PHONE_LEN..=MAX_PHONE_LEN)
        .contains(&phone.len())
        .then_some(phone)
}

pub fn default_message(vendor: Option<&str>, service: Option<&str>) -> String {
    let mut msg = String::from("مرحباً");
    if let Some(vendor) = vendor.filter(|v| !v.trim().is_empty()) {
        msg.push(' ');
        msg.push_str(vendor.trim());
    }
    if let Some(service) = service.filter(|s| !s.trim().is_empty()) {
        msg.push_str("، أنا مهتم بخدمة ");
        msg.push_str(service.trim());
    }
    msg.push_str(". أود الاستفسار عن المزيد من التفاصيل.");
    msg
}

pub fn chat_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_numbers_get_the_saudi_prefix() {
        assert_eq!(normalize_phone("050 123 4567"), "+966501234567");
        assert_eq!(normalize_phone("0165320000"), "+966165320000");
    }

    #[test]
    fn international_numbers_are_only_cleaned() {
        assert_eq!(normalize_phone("+966 (50) 123-4567"), "+966501234567");
        assert_eq!(normalize_phone("+44 20 7946 0018"), "+442079460018");
    }

    #[test]
    fn only_one_leading_zero_is_dropped() {
        assert_eq!(normalize_phone("00501234567"), "+9660501234567");
    }

    #[test]
    fn prefixed_numbers_must_still_fit_the_column() {
        // 20 characters as typed, 23 once the country code replaces the trunk zero
        assert_eq!(storable_phone("05012345678901234567"), None);
        assert_eq!(storable_phone("0501234567").as_deref(), Some("+966501234567"));
    }

    #[test]
    fn bare_prefixes_are_not_stored() {
        assert_eq!(storable_phone(""), None);
        assert_eq!(storable_phone("abc"), None);
        assert_eq!(storable_phone("+1"), None);
    }

    #[test]
    fn default_message_mentions_vendor_and_service() {
        assert_eq!(
            default_message(Some("قاعة التاج"), Some("حفل زفاف")),
            "مرحباً قاعة التاج، أنا مهتم بخدمة حفل زفاف. أود الاستفسار عن المزيد من التفاصيل."
        );
        assert_eq!(
            default_message(None, None),
            "مرحباً. أود الاستفسار عن المزيد من التفاصيل."
        );
    }

    #[test]
    fn link_encodes_the_message() {
        assert_eq!(
            chat_link("0501234567", "hi there?"),
            "https://wa.me/+966501234567?text=hi%20there%3F"
        );
    }
}
