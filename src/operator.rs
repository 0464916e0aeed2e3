//! Operator profile: read, edit, and full-record submit.

use crate::fields::{to_number, to_text, DASH};
use crate::models::WalletSummary;
use crate::normalizer::wallet_summary_from_amount;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Key of the nested contact record in the upstream payload.
const CONTACT_KEY: &str = "operator";

/// Contact details nested under `operator` upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Every field an operator can edit on the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    OperatorName,
    PocName,
    Designation,
    OperatorType,
    Country,
    OfficeAddress,
    Website,
    BeneficiaryName,
    BeneficiaryAccountNumber,
    BeneficiaryBankName,
    IfscCode,
    UpiId,
    PanCard,
    AdharCard,
    License,
    Gst,
    AtoaiRegistration,
    MinistryOfTourismRegistration,
    StateTourismRegistration,
    ContactEmail,
    ContactPhoneNumber,
}

impl ProfileField {
    pub const ALL: [ProfileField; 21] = [
        ProfileField::OperatorName,
        ProfileField::PocName,
        ProfileField::Designation,
        ProfileField::OperatorType,
        ProfileField::Country,
        ProfileField::OfficeAddress,
        ProfileField::Website,
        ProfileField::BeneficiaryName,
        ProfileField::BeneficiaryAccountNumber,
        ProfileField::BeneficiaryBankName,
        ProfileField::IfscCode,
        ProfileField::UpiId,
        ProfileField::PanCard,
        ProfileField::AdharCard,
        ProfileField::License,
        ProfileField::Gst,
        ProfileField::AtoaiRegistration,
        ProfileField::MinistryOfTourismRegistration,
        ProfileField::StateTourismRegistration,
        ProfileField::ContactEmail,
        ProfileField::ContactPhoneNumber,
    ];

    /// Upstream key; contact fields live inside the `operator` object.
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::OperatorName => "operator_name",
            ProfileField::PocName => "poc_name",
            ProfileField::Designation => "designation",
            ProfileField::OperatorType => "operator_type",
            ProfileField::Country => "country",
            ProfileField::OfficeAddress => "office_address",
            ProfileField::Website => "website",
            ProfileField::BeneficiaryName => "beneficiary_name",
            ProfileField::BeneficiaryAccountNumber => "beneficiary_account_number",
            ProfileField::BeneficiaryBankName => "beneficiary_bank_name",
            ProfileField::IfscCode => "ifsc_code",
            ProfileField::UpiId => "upi_id",
            ProfileField::PanCard => "pan_card",
            ProfileField::AdharCard => "adhar_card",
            ProfileField::License => "license",
            ProfileField::Gst => "gst",
            ProfileField::AtoaiRegistration => "atoai_registration",
            ProfileField::MinistryOfTourismRegistration => "ministry_of_tourism_registration",
            ProfileField::StateTourismRegistration => "state_tourism_registration",
            ProfileField::ContactEmail => "email",
            ProfileField::ContactPhoneNumber => "phone_number",
        }
    }

    pub fn is_contact(&self) -> bool {
        matches!(
            self,
            ProfileField::ContactEmail | ProfileField::ContactPhoneNumber
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::OperatorName => "Operator Name",
            ProfileField::PocName => "POC Name",
            ProfileField::Designation => "Designation",
            ProfileField::OperatorType => "Operator Type",
            ProfileField::Country => "Country",
            ProfileField::OfficeAddress => "Office Address",
            ProfileField::Website => "Website",
            ProfileField::BeneficiaryName => "Beneficiary Name",
            ProfileField::BeneficiaryAccountNumber => "Account Number",
            ProfileField::BeneficiaryBankName => "Bank Name",
            ProfileField::IfscCode => "IFSC Code",
            ProfileField::UpiId => "UPI ID",
            ProfileField::PanCard => "PAN Card",
            ProfileField::AdharCard => "Aadhar Card",
            ProfileField::License => "License",
            ProfileField::Gst => "GST",
            ProfileField::AtoaiRegistration => "ATOAI Registration",
            ProfileField::MinistryOfTourismRegistration => "Ministry of Tourism Registration",
            ProfileField::StateTourismRegistration => "State Tourism Registration",
            ProfileField::ContactEmail => "Email",
            ProfileField::ContactPhoneNumber => "Phone Number",
        }
    }
}

/// One field edit from the profile form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEdit {
    pub field: ProfileField,
    pub value: String,
}

/// The operator profile as shown on the profile page.
///
/// Built from the upstream record, which is kept so that submitting sends it
/// back untouched apart from the edited fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperatorProfile {
    pub operator_name: Option<String>,
    pub poc_name: Option<String>,
    pub designation: Option<String>,
    pub operator_type: Option<String>,
    pub country: Option<String>,
    pub operator_unique_code: Option<String>,
    pub office_address: Option<String>,
    pub website: Option<String>,
    pub logo: Option<String>,

    // Payment & banking
    pub beneficiary_name: Option<String>,
    pub beneficiary_account_number: Option<String>,
    pub beneficiary_bank_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub upi_id: Option<String>,

    // Documents & registrations
    pub pan_card: Option<String>,
    pub adhar_card: Option<String>,
    pub license: Option<String>,
    pub gst: Option<String>,
    pub atoai_registration: Option<String>,
    pub ministry_of_tourism_registration: Option<String>,
    pub state_tourism_registration: Option<String>,

    pub onboarded_by_email: Option<String>,
    pub permission: Option<Value>,
    pub contact: Option<Contact>,
    pub wallet: f64,

    #[serde(skip)]
    source: Map<String, Value>,
    #[serde(skip)]
    edited: BTreeSet<ProfileField>,
}

impl OperatorProfile {
    /// Reads a profile from the upstream payload; anything but an object yields an empty profile.
    pub fn from_value(raw: &Value) -> Self {
        let Some(source) = raw.as_object() else {
            return Self::default();
        };

        let text = |key: &str| raw.get(key).and_then(to_text);

        let contact = raw
            .get(CONTACT_KEY)
            .filter(|v| v.is_object())
            .map(|c| Contact {
                email: c.get("email").and_then(to_text),
                phone_number: c.get("phone_number").and_then(to_text),
            });

        Self {
            operator_name: text("operator_name"),
            poc_name: text("poc_name"),
            designation: text("designation"),
            operator_type: text("operator_type"),
            country: text("country"),
            operator_unique_code: text("operator_unique_code"),
            office_address: text("office_address"),
            website: text("website"),
            logo: text("logo"),
            beneficiary_name: text("beneficiary_name"),
            beneficiary_account_number: text("beneficiary_account_number"),
            beneficiary_bank_name: text("beneficiary_bank_name"),
            ifsc_code: text("ifsc_code"),
            upi_id: text("upi_id"),
            pan_card: text("pan_card"),
            adhar_card: text("adhar_card"),
            license: text("license"),
            gst: text("gst"),
            atoai_registration: text("atoai_registration"),
            ministry_of_tourism_registration: text("ministry_of_tourism_registration"),
            state_tourism_registration: text("state_tourism_registration"),
            onboarded_by_email: text("onboarded_by_email"),
            permission: raw.get("permission").filter(|v| !v.is_null()).cloned(),
            contact,
            wallet: raw.get("wallet").and_then(to_number).unwrap_or(0.0),
            source: source.clone(),
            edited: BTreeSet::new(),
        }
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::ContactEmail => self.contact.as_ref()?.email.as_deref(),
            ProfileField::ContactPhoneNumber => self.contact.as_ref()?.phone_number.as_deref(),
            _ => self.slot(field)?.as_deref(),
        }
    }

    /// Display value for a field, `—` when missing.
    pub fn display(&self, field: ProfileField) -> String {
        self.get(field).unwrap_or(DASH).to_string()
    }

    /// Replaces one field. Editing a contact field creates the contact record if needed.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            ProfileField::ContactEmail => self.contact.get_or_insert_with(Contact::default).email = value,
            ProfileField::ContactPhoneNumber => {
                self.contact.get_or_insert_with(Contact::default).phone_number = value
            }
            _ => {
                if let Some(slot) = self.slot_mut(field) {
                    *slot = value;
                }
            }
        }
        self.edited.insert(field);
    }

    pub fn apply_edits(&mut self, edits: &[ProfileEdit]) {
        for edit in edits {
            self.set_field(edit.field, edit.value.clone());
        }
    }

    pub fn edited_fields(&self) -> impl Iterator<Item = ProfileField> + '_ {
        self.edited.iter().copied()
    }

    pub fn wallet_summary(&self) -> WalletSummary {
        wallet_summary_from_amount(self.wallet)
    }

    /// The full record to submit: the upstream record with edited fields written over it.
    pub fn to_payload(&self) -> Value {
        let mut payload = self.source.clone();

        for field in &self.edited {
            let value = self.get(*field).map(Value::from).unwrap_or(Value::Null);
            if field.is_contact() {
                let contact = payload
                    .entry(CONTACT_KEY)
                    .or_insert_with(|| Value::Object(Map::new()));
                if !contact.is_object() {
                    *contact = Value::Object(Map::new());
                }
                if let Some(obj) = contact.as_object_mut() {
                    obj.insert(field.key().to_string(), value);
                }
            } else {
                payload.insert(field.key().to_string(), value);
            }
        }

        Value::Object(payload)
    }

    fn slot(&self, field: ProfileField) -> Option<&Option<String>> {
        let slot = match field {
            ProfileField::OperatorName => &self.operator_name,
            ProfileField::PocName => &self.poc_name,
            ProfileField::Designation => &self.designation,
            ProfileField::OperatorType => &self.operator_type,
            ProfileField::Country => &self.country,
            ProfileField::OfficeAddress => &self.office_address,
            ProfileField::Website => &self.website,
            ProfileField::BeneficiaryName => &self.beneficiary_name,
            ProfileField::BeneficiaryAccountNumber => &self.beneficiary_account_number,
            ProfileField::BeneficiaryBankName => &self.beneficiary_bank_name,
            ProfileField::IfscCode => &self.ifsc_code,
            ProfileField::UpiId => &self.upi_id,
            ProfileField::PanCard => &self.pan_card,
            ProfileField::AdharCard => &self.adhar_card,
            ProfileField::License => &self.license,
            ProfileField::Gst => &self.gst,
            ProfileField::AtoaiRegistration => &self.atoai_registration,
            ProfileField::MinistryOfTourismRegistration => &self.ministry_of_tourism_registration,
            ProfileField::StateTourismRegistration => &self.state_tourism_registration,
            ProfileField::ContactEmail | ProfileField::ContactPhoneNumber => return None,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, field: ProfileField) -> Option<&mut Option<String>> {
        let slot = match field {
            ProfileField::OperatorName => &mut self.operator_name,
            ProfileField::PocName => &mut self.poc_name,
            ProfileField::Designation => &mut self.designation,
            ProfileField::OperatorType => &mut self.operator_type,
            ProfileField::Country => &mut self.country,
            ProfileField::OfficeAddress => &mut self.office_address,
            ProfileField::Website => &mut self.website,
            ProfileField::BeneficiaryName => &mut self.beneficiary_name,
            ProfileField::BeneficiaryAccountNumber => &mut self.beneficiary_account_number,
            ProfileField::BeneficiaryBankName => &mut self.beneficiary_bank_name,
            ProfileField::IfscCode => &mut self.ifsc_code,
            ProfileField::UpiId => &mut self.upi_id,
            ProfileField::PanCard => &mut self.pan_card,
            ProfileField::AdharCard => &mut self.adhar_card,
            ProfileField::License => &mut self.license,
            ProfileField::Gst => &mut self.gst,
            ProfileField::AtoaiRegistration => &mut self.atoai_registration,
            ProfileField::MinistryOfTourismRegistration => {
                &mut self.ministry_of_tourism_registration
            }
            ProfileField::StateTourismRegistration => &mut self.state_tourism_registration,
            ProfileField::ContactEmail | ProfileField::ContactPhoneNumber => return None,
        };
        Some(slot)
    }
}
