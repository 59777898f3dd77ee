//! Company rules engine
//!
//! All derived boolean state about a company (completeness, branding-license
//! validity, member backing, public searchability) plus the collection
//! filters used for public listings. Every predicate is a pure query over a
//! [`CompanyAggregate`], the in-memory association graph loaded for one
//! request. The collection filters are expressed independently and must stay
//! logically equivalent to the instance predicates; the tests assert that
//! agreement on mixed fixtures.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::address::Address;
use crate::models::application::Application;
use crate::models::business_category::BusinessCategory;
use crate::models::company::Company;
use crate::models::event::Event;
use crate::models::payment::Payment;
use crate::models::picture::Picture;
use crate::models::user::User;

/// One company with every owned collection and the users linked through
/// its applications.
#[derive(Debug, Clone)]
pub struct CompanyAggregate {
    pub company: Company,
    pub addresses: Vec<Address>,
    pub payments: Vec<Payment>,
    pub applications: Vec<Application>,
    pub users: Vec<User>,
    pub categories: Vec<BusinessCategory>,
    pub events: Vec<Event>,
    pub pictures: Vec<Picture>,
}

impl CompanyAggregate {
    pub fn new(company: Company) -> Self {
        Self {
            company,
            addresses: Vec::new(),
            payments: Vec::new(),
            applications: Vec::new(),
            users: Vec::new(),
            categories: Vec::new(),
            events: Vec::new(),
            pictures: Vec::new(),
        }
    }

    fn user(&self, user_id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// A company is complete when its name is non-blank and no owned
    /// address is missing a resolved region.
    pub fn information_complete(&self) -> bool {
        !self.company.name_blank() && !self.missing_region()
    }

    pub fn missing_region(&self) -> bool {
        self.addresses.iter().any(|a| !a.has_region())
    }

    /// True iff the most recent completed branding-fee payment is current.
    /// Always a definite boolean; no payments means false.
    pub fn branding_license(&self, today: NaiveDate) -> bool {
        self.payments
            .iter()
            .filter(|p| p.branding_fee() && p.status == crate::models::payment::PaymentStatus::Completed)
            // perpetual payments sort after any dated expiry
            .max_by_key(|p| (p.expire_date.is_none(), p.expire_date))
            .map(|p| p.current(today))
            .unwrap_or(false)
    }

    pub fn has_visible_address(&self) -> bool {
        self.addresses.iter().any(|a| a.visible())
    }

    /// Some accepted application is backed by a user whose membership is
    /// currently active.
    pub fn member_backed(&self, today: NaiveDate) -> bool {
        self.applications.iter().any(|app| {
            app.accepted()
                && self
                    .user(app.user_id)
                    .map(|u| u.membership_current(today))
                    .unwrap_or(false)
        })
    }

    /// Composite rule governing public visibility. Kept as a composition so
    /// a change to any underlying rule propagates here.
    pub fn searchable(&self, today: NaiveDate) -> bool {
        self.information_complete() && self.member_backed(today) && self.branding_license(today)
    }

    /// Minimum membership start date over current members linked through
    /// accepted applications. `None` when there are no current members.
    pub fn earliest_current_member_fee_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        self.applications
            .iter()
            .filter(|app| app.accepted())
            .filter_map(|app| self.user(app.user_id))
            .filter(|u| u.membership_current(today))
            .filter_map(|u| u.membership_start_date)
            .min()
    }

    pub fn category_names(&self) -> Vec<String> {
        sorted_distinct(self.categories.iter().map(|c| c.name.clone()))
    }

    pub fn region_names(&self) -> Vec<String> {
        sorted_distinct(self.addresses.iter().filter_map(|a| a.region.clone()))
    }

    pub fn kommun_names(&self) -> Vec<String> {
        sorted_distinct(self.addresses.iter().filter_map(|a| a.kommun.clone()))
    }

    pub fn city_names(&self) -> Vec<String> {
        sorted_distinct(self.addresses.iter().filter_map(|a| a.city.clone()))
    }

    /// Resolve the mailing address: the `mail`-flagged address, else the
    /// first owned address, else a brand-new empty address which is
    /// appended to the owned collection before being returned. The caller
    /// persists the appended address.
    pub fn resolve_main_address(&mut self) -> &Address {
        if let Some(pos) = self.addresses.iter().position(|a| a.mail) {
            return &self.addresses[pos];
        }
        if self.addresses.is_empty() {
            self.addresses
                .push(Address::new_empty_for_company(self.company.id));
        }
        &self.addresses[0]
    }
}

fn sorted_distinct<I: Iterator<Item = String>>(names: I) -> Vec<String> {
    let set: BTreeSet<String> = names.filter(|n| !n.trim().is_empty()).collect();
    set.into_iter().collect()
}

fn distinct_by_company<'a>(
    companies: impl Iterator<Item = &'a CompanyAggregate>,
) -> Vec<&'a CompanyAggregate> {
    let mut seen: HashSet<Uuid> = HashSet::new();
    companies
        .filter(|agg| seen.insert(agg.company.id))
        .collect()
}

/// Companies with a non-blank name and all addresses region-resolved.
pub fn information_complete(companies: &[CompanyAggregate]) -> Vec<&CompanyAggregate> {
    distinct_by_company(companies.iter().filter(|agg| {
        !agg.company.name_blank() && agg.addresses.iter().all(|a| a.has_region())
    }))
}

/// Companies with at least one completed, unexpired branding-fee payment.
pub fn branding_license_current<'a>(
    companies: &'a [CompanyAggregate],
    today: NaiveDate,
) -> Vec<&'a CompanyAggregate> {
    distinct_by_company(companies.iter().filter(|agg| {
        agg.payments
            .iter()
            .any(|p| p.branding_fee() && p.current(today))
    }))
}

/// Companies with at least one address whose visibility is not `none`.
pub fn with_visible_address(companies: &[CompanyAggregate]) -> Vec<&CompanyAggregate> {
    distinct_by_company(companies.iter().filter(|agg| agg.has_visible_address()))
}

/// Companies with at least one accepted application from a current member.
pub fn member_backed<'a>(
    companies: &'a [CompanyAggregate],
    today: NaiveDate,
) -> Vec<&'a CompanyAggregate> {
    distinct_by_company(companies.iter().filter(|agg| agg.member_backed(today)))
}

/// Companies shown to anonymous visitors: complete, member-backed and
/// branding-licensed, all at once.
pub fn searchable<'a>(
    companies: &'a [CompanyAggregate],
    today: NaiveDate,
) -> Vec<&'a CompanyAggregate> {
    let complete: HashSet<Uuid> = information_complete(companies)
        .iter()
        .map(|agg| agg.company.id)
        .collect();
    let licensed: HashSet<Uuid> = branding_license_current(companies, today)
        .iter()
        .map(|agg| agg.company.id)
        .collect();
    distinct_by_company(companies.iter().filter(|agg| {
        complete.contains(&agg.company.id)
            && licensed.contains(&agg.company.id)
            && agg.member_backed(today)
    }))
}
