//! Integration tests over the public rules API
//!
//! Exercises the derived-state rules, the mailing-address resolution and the
//! shortener memoization the way the HTTP layer consumes them, on in-memory
//! fixtures.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use membership_registry::models::address::{Address, AddressVisibility};
use membership_registry::models::application::{Application, ApplicationState};
use membership_registry::models::company::{Company, CreateCompanyRequest};
use membership_registry::models::payment::{Payment, PaymentStatus, PaymentType};
use membership_registry::models::user::User;
use membership_registry::services::company_rules::{self, CompanyAggregate};
use membership_registry::services::url_shortener::{
    get_or_create_short_brand_url, UrlShortener,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn eligible_company(name: &str) -> CompanyAggregate {
    let mut aggregate =
        CompanyAggregate::new(Company::new(name.to_string(), "5560360793".to_string(), None));
    let company_id = aggregate.company.id;

    let mut address = Address::new_empty_for_company(company_id);
    address.region = Some("Stockholm".to_string());
    address.city = Some("Solna".to_string());
    address.visibility = AddressVisibility::City;
    aggregate.addresses.push(address);

    aggregate.payments.push(Payment {
        id: Uuid::new_v4(),
        company_id,
        user_id: None,
        payment_type: PaymentType::BrandingFee,
        status: PaymentStatus::Completed,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        expire_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        amount: Decimal::new(500, 0),
        created_at: Utc::now(),
    });

    let user = User {
        id: Uuid::new_v4(),
        email: "agare@example.se".to_string(),
        member: true,
        membership_number: Some("1020".to_string()),
        membership_start_date: Some(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()),
        membership_expire_date: Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
        created_at: Utc::now(),
    };
    aggregate.applications.push(Application {
        id: Uuid::new_v4(),
        company_id,
        user_id: user.id,
        state: ApplicationState::Accepted,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    });
    aggregate.users.push(user);

    aggregate
}

#[test]
fn searchable_matches_the_three_legs_on_every_fixture() {
    let mut fixtures = vec![eligible_company("Hundgruppen AB")];

    let mut nameless = eligible_company("");
    nameless.company.name = String::new();
    fixtures.push(nameless);

    let mut unresolved = eligible_company("Tassarnas Trim");
    unresolved.addresses[0].region = None;
    fixtures.push(unresolved);

    let mut lapsed_license = eligible_company("Kurs & Koppel");
    lapsed_license.payments[0].expire_date = Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    fixtures.push(lapsed_license);

    let mut former_member = eligible_company("Valpskolan");
    former_member.users[0].member = false;
    fixtures.push(former_member);

    let selected: Vec<Uuid> = company_rules::searchable(&fixtures, today())
        .iter()
        .map(|aggregate| aggregate.company.id)
        .collect();

    for aggregate in &fixtures {
        let expected = aggregate.information_complete()
            && aggregate.member_backed(today())
            && aggregate.branding_license(today());
        assert_eq!(
            selected.contains(&aggregate.company.id),
            expected,
            "searchable disagreed for {}",
            aggregate.company.name
        );
    }

    // only the fully eligible fixture survives
    assert_eq!(selected.len(), 1);
}

#[test]
fn branding_license_is_always_a_definite_boolean() {
    let cases: Vec<CompanyAggregate> = vec![
        {
            let mut aggregate = eligible_company("No payments");
            aggregate.payments.clear();
            aggregate
        },
        {
            let mut aggregate = eligible_company("Expired");
            aggregate.payments[0].expire_date = Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            aggregate
        },
        eligible_company("Future"),
        {
            let mut aggregate = eligible_company("Mixed");
            let company_id = aggregate.company.id;
            aggregate.payments.push(Payment {
                id: Uuid::new_v4(),
                company_id,
                user_id: None,
                payment_type: PaymentType::BrandingFee,
                status: PaymentStatus::Completed,
                start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                expire_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                amount: Decimal::new(500, 0),
                created_at: Utc::now(),
            });
            aggregate
        },
    ];

    let expected = [false, false, true, true];
    for (aggregate, expected) in cases.iter().zip(expected) {
        assert_eq!(aggregate.branding_license(today()), expected);
    }
}

#[test]
fn main_address_resolution_creates_one_address_once() {
    let mut aggregate =
        CompanyAggregate::new(Company::new("Hundgruppen AB".to_string(), "5560360793".to_string(), None));

    let first = aggregate.resolve_main_address().id;
    assert_eq!(aggregate.addresses.len(), 1);

    let second = aggregate.resolve_main_address().id;
    assert_eq!(aggregate.addresses.len(), 1);
    assert_eq!(first, second);
}

struct FixedShortener(Option<String>);

#[async_trait]
impl UrlShortener for FixedShortener {
    async fn shorten(&self, _url: &str) -> Option<String> {
        self.0.clone()
    }
}

#[tokio::test]
async fn short_brand_url_is_memoized() {
    let mut company = Company::new("Hundgruppen AB".to_string(), "5560360793".to_string(), None);
    let shortener = FixedShortener(Some("https://s.example/h1".to_string()));

    let first = get_or_create_short_brand_url(&mut company, "https://long.example/a", &shortener).await;
    assert!(first.newly_stored);

    // even with a shortener that would now answer differently, the stored
    // value wins
    let different = FixedShortener(Some("https://s.example/other".to_string()));
    let second =
        get_or_create_short_brand_url(&mut company, "https://long.example/a", &different).await;
    assert_eq!(second.url, "https://s.example/h1");
    assert!(!second.newly_stored);
}

#[tokio::test]
async fn short_brand_url_degrades_on_failure() {
    let mut company = Company::new("Hundgruppen AB".to_string(), "5560360793".to_string(), None);
    let shortener = FixedShortener(None);

    let result =
        get_or_create_short_brand_url(&mut company, "https://long.example/a", &shortener).await;
    assert_eq!(result.url, "https://long.example/a");
    assert!(company.short_h_brand_url.is_none());
}

#[test]
fn registration_request_enforces_number_and_email_rules() {
    let valid = CreateCompanyRequest {
        name: Some("Hundgruppen AB".to_string()),
        company_number: "8025685002".to_string(),
        email: Some("info@hundgruppen.se".to_string()),
        website: None,
        description: None,
        external_calendar_id: None,
    };
    assert!(valid.validate().is_ok());

    let nine_chars = CreateCompanyRequest {
        name: None,
        company_number: "123456789".to_string(),
        email: None,
        website: None,
        description: None,
        external_calendar_id: None,
    };
    let errors = nine_chars.validate().unwrap_err();
    assert_eq!(
        errors.field_errors()["company_number"][0].code,
        "length"
    );

    let bad_checksum = CreateCompanyRequest {
        name: None,
        company_number: "1234567890".to_string(),
        email: None,
        website: None,
        description: None,
        external_calendar_id: None,
    };
    let errors = bad_checksum.validate().unwrap_err();
    assert_eq!(
        errors.field_errors()["company_number"][0].code,
        "org_number_checksum"
    );
}
