use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMAIL_REGEX: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

// Constant pattern; `email_pattern_compiles` keeps the expect unreachable.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_REGEX).expect("email pattern is a valid regex"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a choice (fuel, transmission, field, permission) is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{input}'")]
pub struct ParseChoiceError {
    kind: &'static str,
    input: String,
}

impl ParseChoiceError {
    pub(crate) fn new(
        kind: &'static str,
        input: &str,
    ) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    #[serde(rename = "CNG")]
    Cng,
    Electric,
}

impl FuelType {
    pub fn all() -> &'static [FuelType] {
        &[
            FuelType::Petrol,
            FuelType::Diesel,
            FuelType::Cng,
            FuelType::Electric,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Cng => "CNG",
            FuelType::Electric => "Electric",
        }
    }
}

impl FromStr for FuelType {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FuelType::all()
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseChoiceError {
                kind: "fuel type",
                input: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Transmission {
    #[default]
    Manual,
    Automatic,
}

impl Transmission {
    pub fn all() -> &'static [Transmission] {
        &[Transmission::Manual, Transmission::Automatic]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
        }
    }
}

impl FromStr for Transmission {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Transmission::all()
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseChoiceError {
                kind: "transmission",
                input: s.to_string(),
            })
    }
}

/// The free-text fields of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Mobile,
    Email,
    LicenseNumber,
    AadhaarNumber,
    StartDate,
    EndDate,
    CarMake,
    CarModel,
    PlateNumber,
}

impl FormField {
    /// Fields in the order the form presents them.
    pub fn all() -> &'static [FormField] {
        &[
            FormField::FirstName,
            FormField::LastName,
            FormField::Mobile,
            FormField::Email,
            FormField::LicenseNumber,
            FormField::AadhaarNumber,
            FormField::StartDate,
            FormField::EndDate,
            FormField::CarMake,
            FormField::CarModel,
            FormField::PlateNumber,
        ]
    }

    /// Key used for this field in the booking payload.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Mobile => "mobile",
            FormField::Email => "email",
            FormField::LicenseNumber => "licenseNumber",
            FormField::AadhaarNumber => "aadhaarNumber",
            FormField::StartDate => "startDate",
            FormField::EndDate => "endDate",
            FormField::CarMake => "carMake",
            FormField::CarModel => "carModel",
            FormField::PlateNumber => "plateNumber",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Mobile => "Mobile Number",
            FormField::Email => "Email Address",
            FormField::LicenseNumber => "Driving License Number",
            FormField::AadhaarNumber => "Aadhaar Number",
            FormField::StartDate => "Start Date",
            FormField::EndDate => "End Date",
            FormField::CarMake => "Car Make",
            FormField::CarModel => "Car Model",
            FormField::PlateNumber => "Plate Number",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::FirstName
                | FormField::LastName
                | FormField::Mobile
                | FormField::LicenseNumber
                | FormField::CarMake
                | FormField::CarModel
                | FormField::PlateNumber
        )
    }
}

impl FromStr for FormField {
    type Err = ParseChoiceError;

    /// Accepts the payload key in any case, with `-` or `_` separators
    /// (`firstName`, `first_name`, `FIRST-NAME`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        FormField::all()
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParseChoiceError {
                kind: "form field",
                input: s.to_string(),
            })
    }
}

impl fmt::Display for FormField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Driver and vehicle details collected by the booking form.
///
/// Text fields hold exactly what the user typed; nothing is trimmed until
/// validation. Serializes flat with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub start_date: String,
    pub end_date: String,
    pub car_make: String,
    pub car_model: String,
    pub plate_number: String,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub license_number: String,
    pub aadhaar_number: String,
}

impl FormData {
    pub fn get(
        &self,
        field: FormField,
    ) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Mobile => &self.mobile,
            FormField::Email => &self.email,
            FormField::LicenseNumber => &self.license_number,
            FormField::AadhaarNumber => &self.aadhaar_number,
            FormField::StartDate => &self.start_date,
            FormField::EndDate => &self.end_date,
            FormField::CarMake => &self.car_make,
            FormField::CarModel => &self.car_model,
            FormField::PlateNumber => &self.plate_number,
        }
    }

    pub fn set(
        &mut self,
        field: FormField,
        value: impl Into<String>,
    ) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Mobile => &mut self.mobile,
            FormField::Email => &mut self.email,
            FormField::LicenseNumber => &mut self.license_number,
            FormField::AadhaarNumber => &mut self.aadhaar_number,
            FormField::StartDate => &mut self.start_date,
            FormField::EndDate => &mut self.end_date,
            FormField::CarMake => &mut self.car_make,
            FormField::CarModel => &mut self.car_model,
            FormField::PlateNumber => &mut self.plate_number,
        };
        *slot = value.into();
    }

    /// "Make Model" as shown on the confirmation screen.
    pub fn car_description(&self) -> String {
        format!("{} {}", self.car_make.trim(), self.car_model.trim())
            .trim()
            .to_string()
    }

    pub fn driver_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Validates that the form has everything a booking needs.
    ///
    /// Rules:
    /// - every required field is non-blank
    /// - email, when given, looks like an address
    /// - rental dates, when given, are `YYYY-MM-DD` and the end is not
    ///   before the start
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for field in FormField::all().iter().filter(|f| f.is_required()) {
            if self.get(*field).trim().is_empty() {
                errors.push(format!("{} is required.", field.label()));
            }
        }

        let email = self.email.trim();
        if !email.is_empty() && !EMAIL_PATTERN.is_match(email) {
            errors.push(format!("{} is not a valid email address.", FormField::Email.label()));
        }

        let start = parse_optional_date(FormField::StartDate, &self.start_date, &mut errors);
        let end = parse_optional_date(FormField::EndDate, &self.end_date, &mut errors);
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                errors.push("End Date cannot be before Start Date.".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_optional_date(
    field: FormField,
    value: &str,
    errors: &mut Vec<String>,
) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(field = %field, input = %value, "invalid date: {}", e);
            errors.push(format!("{} must be a date (YYYY-MM-DD).", field.label()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn email_pattern_compiles() {
        assert!(Regex::new(EMAIL_REGEX).is_ok());
        assert!(EMAIL_PATTERN.is_match("john@example.com"));
    }

    fn filled() -> FormData {
        FormData {
            first_name: "John".into(),
            last_name: "Doe".into(),
            mobile: "9876543210".into(),
            license_number: "DL-1234567890".into(),
            car_make: "Toyota".into(),
            car_model: "Innova".into(),
            plate_number: "TS 09 AB 1234".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_keeps_petrol_and_manual() {
        let form = FormData::default();
        assert_eq!(form.fuel_type, FuelType::Petrol);
        assert_eq!(form.transmission, Transmission::Manual);
        assert!(form.first_name.is_empty());
    }

    #[test]
    fn required_fields_pass_validation() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = FormData::default().validate().unwrap_err();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&"First Name is required.".to_string()));
        assert!(errors.contains(&"Plate Number is required.".to_string()));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut form = filled();
        form.set(FormField::Mobile, "   ");
        assert_eq!(
            form.validate(),
            Err(vec!["Mobile Number is required.".to_string()])
        );
    }

    #[test]
    fn malformed_email_is_rejected_but_blank_is_fine() {
        let mut form = filled();
        form.set(FormField::Email, "john.example.com");
        assert!(form.validate().is_err());

        form.set(FormField::Email, "john@example.com");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn end_date_before_start_date_is_rejected() {
        let mut form = filled();
        form.set(FormField::StartDate, "2026-10-20");
        form.set(FormField::EndDate, "2026-10-18");
        assert_eq!(
            form.validate(),
            Err(vec!["End Date cannot be before Start Date.".to_string()])
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut form = filled();
        form.set(FormField::StartDate, "20/10/2026");
        assert_eq!(
            form.validate(),
            Err(vec!["Start Date must be a date (YYYY-MM-DD).".to_string()])
        );
    }

    #[test]
    fn form_field_parses_loose_spellings() {
        assert_eq!("firstName".parse::<FormField>(), Ok(FormField::FirstName));
        assert_eq!("first_name".parse::<FormField>(), Ok(FormField::FirstName));
        assert_eq!("PLATE-NUMBER".parse::<FormField>(), Ok(FormField::PlateNumber));
        assert!("favouriteColour".parse::<FormField>().is_err());
    }

    #[test]
    fn choices_parse_case_insensitively() {
        assert_eq!("cng".parse::<FuelType>(), Ok(FuelType::Cng));
        assert_eq!("automatic".parse::<Transmission>(), Ok(Transmission::Automatic));
        assert!("steam".parse::<FuelType>().is_err());
    }

    #[test]
    fn car_description_joins_make_and_model() {
        assert_eq!(filled().car_description(), "Toyota Innova");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(filled()).unwrap();
        assert_eq!(value["firstName"], "John");
        assert_eq!(value["licenseNumber"], "DL-1234567890");
        assert_eq!(value["plateNumber"], "TS 09 AB 1234");
        assert_eq!(value["fuelType"], "Petrol");
        assert_eq!(value["transmission"], "Manual");
        assert_eq!(value["aadhaarNumber"], "");
    }
}
