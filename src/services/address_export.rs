//! Mailing-format address export
//!
//! Formats the resolved mailing address for postal export. Consumes the
//! output of `CompanyAggregate::resolve_main_address`; this is the only
//! entry point for address-export formatting.

use crate::models::address::Address;

/// Swedish postal layout: street, `post_code city`, country on separate
/// lines. Empty components are skipped rather than rendered blank.
pub fn to_mailing_format(recipient: &str, address: &Address) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !recipient.trim().is_empty() {
        lines.push(recipient.trim().to_string());
    }

    if let Some(street) = address.street_address.as_deref() {
        if !street.trim().is_empty() {
            lines.push(street.trim().to_string());
        }
    }

    let locality = match (address.post_code.as_deref(), address.city.as_deref()) {
        (Some(post_code), Some(city)) => format!("{} {}", post_code.trim(), city.trim()),
        (Some(post_code), None) => post_code.trim().to_string(),
        (None, Some(city)) => city.trim().to_string(),
        (None, None) => String::new(),
    };
    if !locality.trim().is_empty() {
        lines.push(locality);
    }

    if !address.country.trim().is_empty() {
        lines.push(address.country.trim().to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_full_address() {
        let mut address = Address::new_empty_for_company(Uuid::new_v4());
        address.street_address = Some("Hundvägen 12".to_string());
        address.post_code = Some("171 64".to_string());
        address.city = Some("Solna".to_string());

        assert_eq!(
            to_mailing_format("Hundgruppen AB", &address),
            "Hundgruppen AB\nHundvägen 12\n171 64 Solna\nSverige"
        );
    }

    #[test]
    fn test_empty_components_skipped() {
        let address = Address::new_empty_for_company(Uuid::new_v4());
        assert_eq!(to_mailing_format("Hundgruppen AB", &address), "Hundgruppen AB\nSverige");
    }

    #[test]
    fn test_city_without_post_code() {
        let mut address = Address::new_empty_for_company(Uuid::new_v4());
        address.city = Some("Lund".to_string());
        assert_eq!(to_mailing_format("", &address), "Lund\nSverige");
    }
}
