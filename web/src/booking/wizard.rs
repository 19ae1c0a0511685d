//! The public booking wizard.
//!
//! [`Stage`] carries the selections that are valid for the current step, so a
//! later step can never hold a value whose prerequisite is missing. Editing an
//! earlier step rebuilds the stage from that point and drops everything that
//! depended on the old value.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{AppointmentConfirmation, BusinessProfile, CreateAppointmentRequest, Service};
use thiserror::Error;

use super::fetch::AvailabilityKey;
use super::validation::{ClientDetails, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Service,
    Professional,
    Time,
    Details,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Service,
        WizardStep::Professional,
        WizardStep::Time,
        WizardStep::Details,
    ];

    /// 1-based position in the flow.
    pub fn ordinal(self) -> usize {
        match self {
            WizardStep::Service => 1,
            WizardStep::Professional => 2,
            WizardStep::Time => 3,
            WizardStep::Details => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::Service => "Service",
            WizardStep::Professional => "Professional",
            WizardStep::Time => "Date & time",
            WizardStep::Details => "Your details",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("this booking has already been confirmed")]
    Closed,

    #[error("a booking request is already being sent")]
    SubmissionInFlight,

    #[error("\"{0}\" is not available yet")]
    StepNotReady(WizardStep),

    #[error("unknown service {0}")]
    UnknownService(i64),

    #[error("unknown professional `{0}`")]
    UnknownProfessional(String),

    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    #[error("choose a unit before picking a time")]
    UnitRequired,

    #[error("{0} is in the past")]
    DateInPast(NaiveDate),

    #[error("no booking request is being sent")]
    NotSubmitting,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

/// How many units the business has, which decides whether the visitor picks one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitPolicy {
    Unassigned,
    Single(String),
    Multiple(Vec<String>),
}

impl UnitPolicy {
    fn from_profile(profile: &BusinessProfile) -> Self {
        match profile.units.as_slice() {
            [] => UnitPolicy::Unassigned,
            [unit] => UnitPolicy::Single(unit.id.clone()),
            units => UnitPolicy::Multiple(units.iter().map(|u| u.id.clone()).collect()),
        }
    }

    pub fn requires_choice(&self) -> bool {
        matches!(self, UnitPolicy::Multiple(_))
    }

    fn sole_unit(&self) -> Option<String> {
        match self {
            UnitPolicy::Single(id) => Some(id.clone()),
            _ => None,
        }
    }

    fn contains(&self, id: &str) -> bool {
        match self {
            UnitPolicy::Unassigned => false,
            UnitPolicy::Single(only) => only == id,
            UnitPolicy::Multiple(ids) => ids.iter().any(|known| known == id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    Service,
    Professional {
        service: Service,
    },
    Time {
        service: Service,
        professional_id: String,
        unit_id: Option<String>,
    },
    Details {
        service: Service,
        professional_id: String,
        unit_id: Option<String>,
        slot: String,
    },
}

impl Stage {
    pub fn step(&self) -> WizardStep {
        match self {
            Stage::Service => WizardStep::Service,
            Stage::Professional { .. } => WizardStep::Professional,
            Stage::Time { .. } => WizardStep::Time,
            Stage::Details { .. } => WizardStep::Details,
        }
    }

    pub fn service(&self) -> Option<&Service> {
        match self {
            Stage::Service => None,
            Stage::Professional { service }
            | Stage::Time { service, .. }
            | Stage::Details { service, .. } => Some(service),
        }
    }

    pub fn professional_id(&self) -> Option<&str> {
        match self {
            Stage::Time {
                professional_id, ..
            }
            | Stage::Details {
                professional_id, ..
            } => Some(professional_id),
            _ => None,
        }
    }

    pub fn unit_id(&self) -> Option<&str> {
        match self {
            Stage::Time { unit_id, .. } | Stage::Details { unit_id, .. } => unit_id.as_deref(),
            _ => None,
        }
    }

    pub fn slot(&self) -> Option<&str> {
        match self {
            Stage::Details { slot, .. } => Some(slot),
            _ => None,
        }
    }
}

/// What the visitor has picked so far, with display names resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSummary {
    pub business_name: String,
    pub service: Service,
    pub professional_name: String,
    pub unit_name: Option<String>,
    pub date: NaiveDate,
    pub time: String,
}

/// Terminal state. Only what the confirmation screen shows survives.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub summary: BookingSummary,
    pub client_name: String,
    pub client_email: String,
    pub appointment: AppointmentConfirmation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    username: String,
    profile: BusinessProfile,
    units: UnitPolicy,
    today: NaiveDate,
    date: NaiveDate,
    stage: Stage,
    reached: WizardStep,
    contact: ClientDetails,
    submitting: bool,
}

impl Wizard {
    pub fn new(username: impl Into<String>, profile: BusinessProfile, today: NaiveDate) -> Self {
        let units = UnitPolicy::from_profile(&profile);
        Self {
            username: username.into(),
            profile,
            units,
            today,
            date: today,
            stage: Stage::Service,
            reached: WizardStep::Service,
            contact: ClientDetails::default(),
            submitting: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn profile(&self) -> &BusinessProfile {
        &self.profile
    }

    pub fn units(&self) -> &UnitPolicy {
        &self.units
    }

    pub fn current_step(&self) -> WizardStep {
        self.stage.step()
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.stage.service()
    }

    pub fn selected_professional_id(&self) -> Option<&str> {
        self.stage.professional_id()
    }

    pub fn selected_unit_id(&self) -> Option<&str> {
        self.stage.unit_id()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.date
    }

    pub fn selected_slot(&self) -> Option<&str> {
        self.stage.slot()
    }

    pub fn contact(&self) -> &ClientDetails {
        &self.contact
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Every step before the furthest one reached. Never shrinks.
    pub fn completed_steps(&self) -> BTreeSet<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .filter(|step| *step < self.reached)
            .collect()
    }

    /// A section stays on screen once its step has been completed.
    pub fn is_step_visible(&self, step: WizardStep) -> bool {
        step == self.current_step() || step < self.reached
    }

    pub fn select_service(&mut self, service: Service) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if self.profile.service(service.id).is_none() {
            return Err(WizardError::UnknownService(service.id));
        }

        self.stage = Stage::Professional { service };
        self.advance_to(WizardStep::Professional);
        Ok(())
    }

    pub fn select_professional(&mut self, professional_id: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let service = self
            .stage
            .service()
            .cloned()
            .ok_or(WizardError::StepNotReady(WizardStep::Professional))?;
        if self.profile.professional(professional_id).is_none() {
            return Err(WizardError::UnknownProfessional(professional_id.to_string()));
        }

        let unit_id = self
            .units
            .sole_unit()
            .or_else(|| self.stage.unit_id().map(str::to_string));

        self.stage = Stage::Time {
            service,
            professional_id: professional_id.to_string(),
            unit_id,
        };
        self.advance_to(WizardStep::Time);
        Ok(())
    }

    /// Narrows the time step to one unit. Does not advance the wizard.
    pub fn select_unit(&mut self, unit_id: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if !self.units.contains(unit_id) {
            return Err(WizardError::UnknownUnit(unit_id.to_string()));
        }

        match &mut self.stage {
            Stage::Time { unit_id: current, .. } => {
                *current = Some(unit_id.to_string());
                Ok(())
            }
            Stage::Details {
                service,
                professional_id,
                unit_id: current,
                ..
            } => {
                if current.as_deref() != Some(unit_id) {
                    self.stage = Stage::Time {
                        service: service.clone(),
                        professional_id: professional_id.clone(),
                        unit_id: Some(unit_id.to_string()),
                    };
                }
                Ok(())
            }
            _ => Err(WizardError::StepNotReady(WizardStep::Time)),
        }
    }

    pub fn select_slot(&mut self, slot: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let (service, professional_id, unit_id) = match &self.stage {
            Stage::Time {
                service,
                professional_id,
                unit_id,
            }
            | Stage::Details {
                service,
                professional_id,
                unit_id,
                ..
            } => (service.clone(), professional_id.clone(), unit_id.clone()),
            _ => return Err(WizardError::StepNotReady(WizardStep::Time)),
        };
        if self.units.requires_choice() && unit_id.is_none() {
            return Err(WizardError::UnitRequired);
        }

        self.stage = Stage::Details {
            service,
            professional_id,
            unit_id,
            slot: slot.to_string(),
        };
        self.advance_to(WizardStep::Details);
        Ok(())
    }

    /// Slots are date-scoped, so a new date drops any picked slot.
    pub fn change_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if date < self.today {
            return Err(WizardError::DateInPast(date));
        }
        if date == self.date {
            return Ok(());
        }

        self.date = date;
        self.drop_slot();
        Ok(())
    }

    /// `None` until every input the availability lookup needs is present.
    pub fn availability_key(&self) -> Option<AvailabilityKey> {
        let service = self.stage.service()?;
        let professional_id = self.stage.professional_id()?;
        let unit_id = self.stage.unit_id().map(str::to_string);
        if self.units.requires_choice() && unit_id.is_none() {
            return None;
        }

        Some(AvailabilityKey {
            username: self.username.clone(),
            date: self.date,
            service_id: service.id,
            professional_id: professional_id.to_string(),
            unit_id,
        })
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        let Stage::Details {
            service,
            professional_id,
            unit_id,
            slot,
        } = &self.stage
        else {
            return None;
        };

        let professional_name = self
            .profile
            .professional(professional_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| professional_id.clone());
        let unit_name = unit_id
            .as_deref()
            .and_then(|id| self.profile.unit(id))
            .map(|unit| unit.name.clone());

        Some(BookingSummary {
            business_name: self.profile.owner.display_name().to_string(),
            service: service.clone(),
            professional_name,
            unit_name,
            date: self.date,
            time: slot.clone(),
        })
    }

    /// Validates contact details and builds the create request.
    ///
    /// The entered details are kept whether or not they pass, so a failed
    /// attempt never wipes the form.
    pub fn begin_submission(
        &mut self,
        details: ClientDetails,
    ) -> Result<CreateAppointmentRequest, SubmitError> {
        self.ensure_editable()?;
        let Stage::Details {
            service,
            professional_id,
            unit_id,
            slot,
        } = &self.stage
        else {
            return Err(WizardError::StepNotReady(WizardStep::Details).into());
        };

        self.contact = details;
        let contact = self.contact.validate()?;

        let request = CreateAppointmentRequest {
            service_id: service.id,
            professional_id: professional_id.clone(),
            unit_id: unit_id.clone(),
            date: self.date.format("%Y-%m-%d").to_string(),
            time: slot.clone(),
            client_name: contact.name.clone(),
            client_email: contact.email.clone(),
            client_phone: contact.phone.clone(),
        };

        self.contact = contact;
        self.submitting = true;
        Ok(request)
    }

    /// The server refused the booking; stay on the details step.
    pub fn fail_submission(&mut self) {
        self.submitting = false;
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInFlight);
        }
        Ok(())
    }

    fn advance_to(&mut self, step: WizardStep) {
        self.reached = self.reached.max(step);
    }

    fn drop_slot(&mut self) {
        if let Stage::Details {
            service,
            professional_id,
            unit_id,
            ..
        } = &self.stage
        {
            self.stage = Stage::Time {
                service: service.clone(),
                professional_id: professional_id.clone(),
                unit_id: unit_id.clone(),
            };
        }
    }
}

/// A booking session: editable until confirmed, then frozen for good.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingFlow {
    Editing(Wizard),
    Confirmed(BookingConfirmation),
}

impl BookingFlow {
    pub fn new(wizard: Wizard) -> Self {
        BookingFlow::Editing(wizard)
    }

    pub fn wizard(&self) -> Option<&Wizard> {
        match self {
            BookingFlow::Editing(wizard) => Some(wizard),
            BookingFlow::Confirmed(_) => None,
        }
    }

    pub fn wizard_mut(&mut self) -> Result<&mut Wizard, WizardError> {
        match self {
            BookingFlow::Editing(wizard) => Ok(wizard),
            BookingFlow::Confirmed(_) => Err(WizardError::Closed),
        }
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match self {
            BookingFlow::Confirmed(confirmation) => Some(confirmation),
            BookingFlow::Editing(_) => None,
        }
    }

    /// Moves to the terminal state. The wizard and its selections are dropped.
    pub fn confirm(&mut self, appointment: AppointmentConfirmation) -> Result<(), WizardError> {
        let wizard = self.wizard_mut()?;
        if !wizard.submitting {
            return Err(WizardError::NotSubmitting);
        }
        let summary = wizard
            .summary()
            .ok_or(WizardError::StepNotReady(WizardStep::Details))?;
        let client_name = wizard.contact.name.clone();
        let client_email = wizard.contact.email.clone();

        *self = BookingFlow::Confirmed(BookingConfirmation {
            summary,
            client_name,
            client_email,
            appointment,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::format;
    use shared_types::{BusinessOwner, Professional, Unit};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn corte() -> Service {
        Service {
            id: 1,
            name: "Corte".into(),
            duration: 30,
            price: 40.0,
            description: None,
        }
    }

    fn barba() -> Service {
        Service {
            id: 2,
            name: "Barba".into(),
            duration: 20,
            price: 25.0,
            description: None,
        }
    }

    fn unit(id: &str, name: &str) -> Unit {
        Unit {
            id: id.into(),
            name: name.into(),
            address: None,
        }
    }

    fn profile(units: Vec<Unit>) -> BusinessProfile {
        BusinessProfile {
            owner: BusinessOwner {
                name: "Ana Souza".into(),
                username: "ana".into(),
                business_name: Some("Studio Ana".into()),
                phone: None,
            },
            professionals: vec![
                Professional {
                    id: "p1".into(),
                    name: "Ana".into(),
                    avatar_url: None,
                    specialty: None,
                },
                Professional {
                    id: "p2".into(),
                    name: "Bruno".into(),
                    avatar_url: None,
                    specialty: None,
                },
            ],
            units,
            services: vec![corte(), barba()],
        }
    }

    fn single_unit_wizard() -> Wizard {
        Wizard::new("ana", profile(vec![unit("u1", "Centro")]), date(15))
    }

    fn at_details(wizard: &mut Wizard) {
        wizard.select_service(corte()).unwrap();
        wizard.select_professional("p1").unwrap();
        wizard.select_slot("10:00").unwrap();
    }

    fn joao() -> ClientDetails {
        ClientDetails::new("João", "joao@x.com", "11999999999")
    }

    #[test]
    fn starts_at_service_with_today_selected() {
        let wizard = single_unit_wizard();
        assert_eq!(wizard.current_step(), WizardStep::Service);
        assert_eq!(wizard.selected_date(), date(15));
        assert!(wizard.completed_steps().is_empty());
        assert!(wizard.availability_key().is_none());
    }

    #[test]
    fn completed_steps_never_shrink() {
        let mut wizard = single_unit_wizard();
        let mut previous = wizard.completed_steps();

        let mut check = |wizard: &Wizard| {
            let now = wizard.completed_steps();
            assert!(previous.is_subset(&now), "{previous:?} not within {now:?}");
            previous = now;
        };

        wizard.select_service(corte()).unwrap();
        check(&wizard);
        wizard.select_professional("p1").unwrap();
        check(&wizard);
        wizard.select_slot("09:00").unwrap();
        check(&wizard);
        wizard.select_service(barba()).unwrap();
        check(&wizard);
        wizard.select_professional("p2").unwrap();
        check(&wizard);

        assert_eq!(
            wizard.completed_steps(),
            BTreeSet::from([WizardStep::Service, WizardStep::Professional, WizardStep::Time])
        );
    }

    #[test]
    fn changing_service_resets_later_selections() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);

        wizard.select_service(barba()).unwrap();

        assert_eq!(wizard.selected_service().map(|s| s.id), Some(2));
        assert_eq!(wizard.selected_professional_id(), None);
        assert_eq!(wizard.selected_unit_id(), None);
        assert_eq!(wizard.selected_slot(), None);
        assert_eq!(wizard.current_step(), WizardStep::Professional);
        assert!(!wizard.is_step_visible(WizardStep::Details));
        for step in [WizardStep::Service, WizardStep::Professional, WizardStep::Time] {
            assert!(wizard.is_step_visible(step), "{step} should stay visible");
        }
        assert_eq!(
            wizard.completed_steps(),
            BTreeSet::from([WizardStep::Service, WizardStep::Professional, WizardStep::Time])
        );
    }

    #[test]
    fn reset_date_input_agrees_with_a_fresh_wizard() {
        let today = format::today();
        let wizard = Wizard::new("bruno", profile(vec![]), today);

        let input = format::date_param(today);
        assert_eq!(format::parse_date_param(&input), Some(wizard.selected_date()));
    }

    #[test]
    fn business_without_units_books_without_unit() {
        let mut wizard = Wizard::new("ana", profile(vec![]), date(15));
        wizard.select_service(corte()).unwrap();
        wizard.select_professional("p1").unwrap();

        let key = wizard.availability_key().unwrap();
        assert_eq!(key.unit_id, None);
        assert_eq!(key.professional_id, "p1");

        assert_eq!(
            wizard.select_unit("u1"),
            Err(WizardError::UnknownUnit("u1".into()))
        );

        wizard.select_slot("09:00").unwrap();
        assert_eq!(wizard.current_step(), WizardStep::Details);

        let request = wizard.begin_submission(joao()).unwrap();
        assert_eq!(request.unit_id, None);
        assert_eq!(request.time, "09:00");
    }

    #[test]
    fn changing_professional_resets_slot_and_reassigns_sole_unit() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);

        wizard.select_professional("p2").unwrap();

        assert_eq!(wizard.selected_slot(), None);
        assert_eq!(wizard.selected_unit_id(), Some("u1"));
        assert_eq!(wizard.current_step(), WizardStep::Time);
    }

    #[test]
    fn single_unit_skips_unit_choice() {
        let mut wizard = Wizard::new(
            "ana",
            BusinessProfile {
                services: vec![corte()],
                professionals: vec![Professional {
                    id: "p1".into(),
                    name: "Ana".into(),
                    avatar_url: None,
                    specialty: None,
                }],
                ..profile(vec![unit("u1", "Centro")])
            },
            date(15),
        );

        wizard.select_service(corte()).unwrap();
        wizard.select_professional("p1").unwrap();

        assert_eq!(wizard.current_step(), WizardStep::Time);
        assert_eq!(wizard.selected_unit_id(), Some("u1"));
        assert!(!wizard.units().requires_choice());
    }

    #[test]
    fn multiple_units_gate_availability_and_slots() {
        let mut wizard = Wizard::new(
            "ana",
            profile(vec![unit("u1", "Centro"), unit("u2", "Norte")]),
            date(15),
        );
        wizard.select_service(corte()).unwrap();
        wizard.select_professional("p1").unwrap();

        assert_eq!(wizard.selected_unit_id(), None);
        assert!(wizard.availability_key().is_none());
        assert_eq!(wizard.select_slot("09:00"), Err(WizardError::UnitRequired));

        wizard.select_unit("u2").unwrap();
        assert_eq!(wizard.current_step(), WizardStep::Time);
        assert_eq!(
            wizard.availability_key().and_then(|k| k.unit_id),
            Some("u2".to_string())
        );

        wizard.select_slot("09:00").unwrap();
        wizard.select_unit("u1").unwrap();
        assert_eq!(wizard.selected_slot(), None);
        assert_eq!(wizard.current_step(), WizardStep::Time);

        assert_eq!(
            wizard.select_unit("u9"),
            Err(WizardError::UnknownUnit("u9".into()))
        );
    }

    #[test]
    fn availability_key_needs_service_and_professional() {
        let mut wizard = single_unit_wizard();
        assert!(wizard.availability_key().is_none());

        wizard.select_service(corte()).unwrap();
        assert!(wizard.availability_key().is_none());

        wizard.select_professional("p1").unwrap();
        assert_eq!(
            wizard.availability_key(),
            Some(AvailabilityKey {
                username: "ana".into(),
                date: date(15),
                service_id: 1,
                professional_id: "p1".into(),
                unit_id: Some("u1".into()),
            })
        );
    }

    #[test]
    fn selecting_a_slot_advances_to_details() {
        let mut wizard = single_unit_wizard();
        wizard.select_service(corte()).unwrap();
        wizard.select_professional("p1").unwrap();

        wizard.select_slot("10:00").unwrap();

        assert_eq!(wizard.current_step(), WizardStep::Details);
        assert_eq!(wizard.selected_slot(), Some("10:00"));
    }

    #[test]
    fn out_of_order_selections_are_refused() {
        let mut wizard = single_unit_wizard();
        assert_eq!(
            wizard.select_professional("p1"),
            Err(WizardError::StepNotReady(WizardStep::Professional))
        );
        assert_eq!(
            wizard.select_slot("09:00"),
            Err(WizardError::StepNotReady(WizardStep::Time))
        );

        wizard.select_service(corte()).unwrap();
        assert_eq!(
            wizard.select_professional("ghost"),
            Err(WizardError::UnknownProfessional("ghost".into()))
        );
    }

    #[test]
    fn changing_date_clears_slot() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);

        wizard.change_date(date(16)).unwrap();

        assert_eq!(wizard.selected_slot(), None);
        assert_eq!(wizard.current_step(), WizardStep::Time);
        assert_eq!(wizard.availability_key().map(|k| k.date), Some(date(16)));
        assert!(wizard.begin_submission(joao()).is_err());

        wizard.select_slot("11:00").unwrap();
        assert_eq!(wizard.current_step(), WizardStep::Details);
    }

    #[test]
    fn same_date_keeps_slot_and_past_dates_are_refused() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);

        wizard.change_date(date(15)).unwrap();
        assert_eq!(wizard.selected_slot(), Some("10:00"));

        assert_eq!(
            wizard.change_date(date(14)),
            Err(WizardError::DateInPast(date(14)))
        );
    }

    #[test]
    fn invalid_email_blocks_submission_and_keeps_details_step() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);

        let result = wizard.begin_submission(ClientDetails::new("João", "not-an-email", "11999999999"));

        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.current_step(), WizardStep::Details);
        assert_eq!(wizard.contact().email, "not-an-email");
    }

    #[test]
    fn submission_builds_request_from_selection() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);

        let request = wizard.begin_submission(joao()).unwrap();

        assert_eq!(request.professional_id, "p1");
        assert_eq!(request.service_id, 1);
        assert_eq!(request.date, "2024-01-15");
        assert_eq!(request.time, "10:00");
        assert_eq!(request.client_name, "João");
        assert_eq!(request.client_email, "joao@x.com");
        assert_eq!(request.client_phone, "11999999999");
        assert_eq!(request.unit_id.as_deref(), Some("u1"));
        assert!(wizard.is_submitting());
    }

    #[test]
    fn in_flight_submission_locks_the_wizard() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);
        wizard.begin_submission(joao()).unwrap();

        assert_eq!(
            wizard.begin_submission(joao()),
            Err(SubmitError::Wizard(WizardError::SubmissionInFlight))
        );
        assert_eq!(
            wizard.select_slot("11:00"),
            Err(WizardError::SubmissionInFlight)
        );

        wizard.fail_submission();
        assert_eq!(wizard.current_step(), WizardStep::Details);
        assert_eq!(wizard.contact(), &joao());
        assert!(wizard.begin_submission(joao()).is_ok());
    }

    #[test]
    fn confirmation_is_terminal() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);
        wizard.begin_submission(joao()).unwrap();
        let mut flow = BookingFlow::new(wizard);

        flow.confirm(AppointmentConfirmation {
            id: "apt-1".into(),
            status: Some("scheduled".into()),
            date: None,
            time: None,
        })
        .unwrap();

        let confirmation = flow.confirmation().unwrap();
        assert_eq!(confirmation.summary.professional_name, "Ana");
        assert_eq!(confirmation.summary.unit_name.as_deref(), Some("Centro"));
        assert_eq!(confirmation.summary.time, "10:00");
        assert_eq!(confirmation.client_name, "João");
        assert!(flow.wizard().is_none());
        assert_eq!(flow.wizard_mut().err(), Some(WizardError::Closed));
    }

    #[test]
    fn confirm_requires_a_pending_submission() {
        let mut wizard = single_unit_wizard();
        at_details(&mut wizard);
        let mut flow = BookingFlow::new(wizard);

        let result = flow.confirm(AppointmentConfirmation {
            id: "apt-1".into(),
            status: None,
            date: None,
            time: None,
        });

        assert_eq!(result, Err(WizardError::NotSubmitting));
        assert!(flow.confirmation().is_none());
    }
}
