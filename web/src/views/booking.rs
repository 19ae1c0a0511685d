use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;
use shared_types::{BusinessProfile, Professional, Service, Unit};
use thaw::*;

use super::booking_confirmation::BookingConfirmationView;
use crate::api::{ApiClient, ApiConfig, ApiError};
use crate::booking::{
    AvailabilityKey, BookingConfirmation, BookingFlow, ClientDetails, FetchState, FetchTicket,
    FetchTracker, SubmitError, ValidationErrors, Wizard, WizardError, WizardStep,
};
use crate::components::{
    BookingSummaryCard, ClientDetailsForm, ErrorView, LoadingView, Notice, NoticeBar,
    ProfessionalSelector, ServiceSelector, StepIndicator, TimeSlotPicker, UnitSelector,
};
use crate::config::AppConfig;
use crate::utils::auth::stored_auth_token;
use crate::utils::format::{date_param, parse_date_param, today};
use crate::utils::navigation::{page_origin, redirect_to};

type ProfileTracker = FetchTracker<String, BusinessProfile>;
type AvailabilityTracker = FetchTracker<AvailabilityKey, Vec<String>>;

#[derive(Debug, Clone, PartialEq)]
enum PageState {
    Loading,
    Missing,
    Failed(String),
    Ready(BusinessProfile),
    Confirmed(BookingConfirmation),
}

fn booking_api_client(
    config: &AppConfig,
    notice: RwSignal<Option<Notice>>,
) -> Result<ApiClient, ApiError> {
    let token_key = config.auth_token_key.clone();
    let login_path = config.login_path.clone();

    ApiClient::new(
        ApiConfig::new(config.api_url(page_origin().as_deref()))
            .with_token_provider(move || stored_auth_token(&token_key))
            .with_session_expired(move || redirect_to(&login_path))
            .with_subscription_required(move |message| {
                notice.set(Some(Notice::warning(message)));
            }),
    )
}

fn profile_error_message(err: &ApiError) -> String {
    match err {
        ApiError::NotFound => "This booking page does not exist.".to_string(),
        other => other.user_message(),
    }
}

/// Every signal the wizard sections share. All handles, so it is `Copy`.
#[derive(Clone, Copy)]
struct BookingContext {
    api: StoredValue<ApiClient>,
    flow: RwSignal<Option<BookingFlow>>,
    availability: RwSignal<AvailabilityTracker>,
    notice: RwSignal<Option<Notice>>,
    date_input: RwSignal<String>,
    client_name: RwSignal<String>,
    client_email: RwSignal<String>,
    client_phone: RwSignal<String>,
    field_errors: RwSignal<ValidationErrors>,
}

impl BookingContext {
    fn read_wizard<T>(&self, read: impl FnOnce(&Wizard) -> T) -> Option<T> {
        self.flow
            .with(|flow| flow.as_ref().and_then(BookingFlow::wizard).map(read))
    }

    /// Runs a wizard transition and reports a refusal as a notice.
    fn apply(&self, action: impl FnOnce(&mut Wizard) -> Result<(), WizardError>) -> bool {
        let mut outcome = Err(WizardError::StepNotReady(WizardStep::Service));
        self.flow.update(|flow| {
            if let Some(flow) = flow.as_mut() {
                outcome = flow.wizard_mut().and_then(action);
            }
        });

        match outcome {
            Ok(()) => true,
            Err(e) => {
                warn!("Booking step rejected: {}", e);
                self.notice.set(Some(Notice::warning(e.to_string())));
                false
            }
        }
    }

    fn load_availability(&self, ticket: FetchTicket<AvailabilityKey>) {
        let availability = self.availability;
        let client = self.api.get_value();
        spawn_local(async move {
            let result = client
                .get_availability(&ticket.key)
                .await
                .map_err(|e| e.user_message());
            availability.update(|tracker| {
                if !tracker.resolve(ticket, result) {
                    log!("Discarded availability response for an outdated selection");
                }
            });
        });
    }

    fn sync_date(&self) {
        let Some(date) = parse_date_param(&self.date_input.get()) else {
            return;
        };
        let current = self
            .flow
            .with_untracked(|flow| flow.as_ref().and_then(BookingFlow::wizard).map(Wizard::selected_date));
        let Some(current) = current else {
            return;
        };

        if date != current && !self.apply(|wizard| wizard.change_date(date)) {
            self.date_input.set(date_param(current));
        }
    }

    fn submit(&self) {
        let details = ClientDetails::new(
            self.client_name.get_untracked(),
            self.client_email.get_untracked(),
            self.client_phone.get_untracked(),
        );

        let mut username = String::new();
        let mut outcome = Err(SubmitError::Wizard(WizardError::StepNotReady(WizardStep::Details)));
        self.flow.update(|flow| {
            if let Some(flow) = flow.as_mut() {
                outcome = flow
                    .wizard_mut()
                    .map_err(SubmitError::from)
                    .and_then(|wizard| {
                        username = wizard.username().to_string();
                        wizard.begin_submission(details)
                    });
            }
        });

        let request = match outcome {
            Ok(request) => request,
            Err(SubmitError::Invalid(errors)) => {
                self.field_errors.set(errors);
                return;
            }
            Err(SubmitError::Wizard(e)) => {
                warn!("Submission refused: {}", e);
                self.notice.set(Some(Notice::warning(e.to_string())));
                return;
            }
        };

        self.field_errors.set(ValidationErrors::default());
        self.notice.set(None);

        let ctx = *self;
        let client = self.api.get_value();
        spawn_local(async move {
            match client.create_public_appointment(&username, &request).await {
                Ok(appointment) => {
                    log!("Booking confirmed: {}", appointment.id);
                    let mut confirmed = Ok(());
                    ctx.flow.update(|flow| {
                        if let Some(flow) = flow.as_mut() {
                            confirmed = flow.confirm(appointment);
                        }
                    });
                    if let Err(e) = confirmed {
                        error!("Could not record confirmation: {}", e);
                    }
                }
                Err(e) => {
                    error!("Booking request failed: {}", e);
                    ctx.flow.update(|flow| {
                        if let Some(Ok(wizard)) = flow.as_mut().map(BookingFlow::wizard_mut) {
                            wizard.fail_submission();
                        }
                    });
                    ctx.notice.set(Some(Notice::error(e.user_message())));

                    // The slot may have been taken meanwhile.
                    let mut reload = None;
                    ctx.availability.update(|tracker| reload = tracker.refresh());
                    if let Some(ticket) = reload {
                        ctx.load_availability(ticket);
                    }
                }
            }
        });
    }
}

#[component]
pub fn BookingPage() -> impl IntoView {
    let params = use_params_map();
    let username = Memo::new(move |_| {
        params
            .read()
            .get("username")
            .map(|name| name.trim().to_string())
            .unwrap_or_default()
    });

    let notice = RwSignal::new(None::<Notice>);
    let config = AppConfig::load();
    let client = match booking_api_client(&config, notice) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build API client: {}", e);
            return view! {
                <ErrorView title="Booking unavailable" message=e.user_message() />
            }
            .into_any();
        }
    };

    let ctx = BookingContext {
        api: StoredValue::new(client),
        flow: RwSignal::new(None),
        availability: RwSignal::new(AvailabilityTracker::new()),
        notice,
        date_input: RwSignal::new(date_param(today())),
        client_name: RwSignal::new(String::new()),
        client_email: RwSignal::new(String::new()),
        client_phone: RwSignal::new(String::new()),
        field_errors: RwSignal::new(ValidationErrors::default()),
    };
    let profile = RwSignal::new(ProfileTracker::new());

    // Business profile, keyed by the username in the URL.
    Effect::new(move |_| {
        let user = username.get();
        let key = (!user.is_empty()).then_some(user);

        let mut ticket = None;
        profile.update(|tracker| ticket = tracker.request(key));
        let Some(ticket) = ticket else {
            return;
        };

        ctx.flow.set(None);
        ctx.date_input.set(date_param(today()));
        let client = ctx.api.get_value();
        spawn_local(async move {
            let result = client.get_business_profile(&ticket.key).await;
            let wizard = result
                .as_ref()
                .ok()
                .map(|loaded| Wizard::new(ticket.key.clone(), loaded.clone(), today()));
            let result = result.map_err(|e| {
                error!("Failed to load business profile: {}", e);
                profile_error_message(&e)
            });

            let mut applied = false;
            profile.update(|tracker| applied = tracker.resolve(ticket, result));
            if applied {
                ctx.flow.set(wizard.map(BookingFlow::new));
            }
        });
    });

    // Availability, refetched whenever any part of its key changes.
    let availability_key = Memo::new(move |_| ctx.read_wizard(Wizard::availability_key).flatten());
    Effect::new(move |_| {
        let key = availability_key.get();

        let mut ticket = None;
        ctx.availability
            .update(|tracker| ticket = tracker.request(key));
        if let Some(ticket) = ticket {
            ctx.load_availability(ticket);
        }
    });

    Effect::new(move |_| ctx.sync_date());

    let page_state = Memo::new(move |_| {
        let confirmed = ctx
            .flow
            .with(|flow| flow.as_ref().and_then(BookingFlow::confirmation).cloned());
        if let Some(confirmation) = confirmed {
            return PageState::Confirmed(confirmation);
        }

        let has_wizard = ctx.flow.with(|flow| flow.is_some());
        let has_username = username.with(|name| !name.is_empty());
        profile.with(|tracker| match tracker.state() {
            // The first fetch starts after hydration.
            FetchState::Idle if has_username => PageState::Loading,
            FetchState::Idle => PageState::Missing,
            FetchState::Loading => PageState::Loading,
            FetchState::Failed(message) => PageState::Failed(message.clone()),
            FetchState::Ready(loaded) if has_wizard => PageState::Ready(loaded.clone()),
            FetchState::Ready(_) => PageState::Loading,
        })
    });

    view! {
        <Title text="Book an appointment" />
        <div class="booking-page">
            <NoticeBar notice=notice />
            {move || match page_state.get() {
                PageState::Loading => view! {
                    <LoadingView message="Loading booking page..." />
                }.into_any(),
                PageState::Missing => view! {
                    <ErrorView title="Booking page not found" message="No business was specified in the address." />
                }.into_any(),
                PageState::Failed(message) => view! {
                    <ErrorView title="Booking unavailable" message=message />
                }.into_any(),
                PageState::Ready(loaded) => booking_wizard(ctx, loaded).into_any(),
                PageState::Confirmed(confirmation) => view! {
                    <BookingConfirmationView confirmation=confirmation />
                }.into_any(),
            }}
        </div>
    }
    .into_any()
}

fn booking_wizard(ctx: BookingContext, profile: BusinessProfile) -> impl IntoView {
    let BusinessProfile {
        owner,
        professionals,
        units,
        services,
    } = profile;
    let multiple_units = units.len() > 1;

    let current = Memo::new(move |_| {
        ctx.read_wizard(Wizard::current_step)
            .unwrap_or(WizardStep::Service)
    });
    let completed = Memo::new(move |_| ctx.read_wizard(Wizard::completed_steps).unwrap_or_default());
    let show_professional =
        Memo::new(move |_| ctx.read_wizard(|w| w.is_step_visible(WizardStep::Professional)) == Some(true));
    let show_time =
        Memo::new(move |_| ctx.read_wizard(|w| w.is_step_visible(WizardStep::Time)) == Some(true));
    let show_details =
        Memo::new(move |_| ctx.read_wizard(|w| w.is_step_visible(WizardStep::Details)) == Some(true));

    let selected_service =
        Memo::new(move |_| ctx.read_wizard(|w| w.selected_service().map(|s| s.id)).flatten());
    let selected_professional = Memo::new(move |_| {
        ctx.read_wizard(|w| w.selected_professional_id().map(str::to_string))
            .flatten()
    });
    let selected_unit = Memo::new(move |_| {
        ctx.read_wizard(|w| w.selected_unit_id().map(str::to_string))
            .flatten()
    });
    let selected_slot = Memo::new(move |_| {
        ctx.read_wizard(|w| w.selected_slot().map(str::to_string))
            .flatten()
    });
    let submitting = Memo::new(move |_| ctx.read_wizard(Wizard::is_submitting).unwrap_or(false));

    let on_service = move |service: Service| {
        ctx.apply(move |wizard| wizard.select_service(service));
    };
    let on_professional = move |professional: Professional| {
        ctx.apply(move |wizard| wizard.select_professional(&professional.id));
    };
    let on_unit = move |unit: Unit| {
        ctx.apply(move |wizard| wizard.select_unit(&unit.id));
    };
    let on_slot = move |slot: String| {
        ctx.apply(move |wizard| wizard.select_slot(&slot));
    };
    let on_submit = move || ctx.submit();

    let slots = Signal::derive(move || ctx.availability.with(|tracker| tracker.current().cloned()));
    let slots_loading = Signal::derive(move || ctx.availability.with(|tracker| tracker.is_loading()));
    let slots_error =
        Signal::derive(move || ctx.availability.with(|tracker| tracker.error().map(str::to_string)));

    view! {
        <div class="booking-wizard">
            <header class="booking-header">
                <h1>{owner.display_name().to_string()}</h1>
                <p class="booking-subtitle">"Book an appointment in a few steps"</p>
            </header>

            <StepIndicator steps=WizardStep::ALL.to_vec() current=current completed=completed />

            <section class="booking-section">
                <h2>"Choose a service"</h2>
                <ServiceSelector services=services selected=selected_service on_select=on_service />
            </section>

            {move || show_professional.get().then(|| view! {
                <section class="booking-section">
                    <h2>"Choose a professional"</h2>
                    <ProfessionalSelector
                        professionals=professionals.clone()
                        selected=selected_professional
                        on_select=on_professional
                    />
                </section>
            })}

            {move || show_time.get().then(|| view! {
                <section class="booking-section">
                    <h2>"Pick a date and time"</h2>
                    {multiple_units.then(|| view! {
                        <div class="booking-units">
                            <h3>"Where would you like to be seen?"</h3>
                            <UnitSelector units=units.clone() selected=selected_unit on_select=on_unit />
                        </div>
                    })}
                    <div class="form-group booking-date">
                        <label for="booking-date">"Date"</label>
                        <Input id="booking-date" input_type=InputType::Date value={ctx.date_input} />
                    </div>
                    <TimeSlotPicker
                        slots=slots
                        loading=slots_loading
                        error=slots_error
                        selected=selected_slot
                        on_slot_selected=on_slot
                    />
                </section>
            })}

            {move || show_details.get().then(|| view! {
                <section class="booking-section">
                    <h2>"Your details"</h2>
                    {move || ctx.read_wizard(Wizard::summary).flatten().map(|summary| view! {
                        <BookingSummaryCard summary=summary />
                    })}
                    <ClientDetailsForm
                        name={ctx.client_name}
                        email={ctx.client_email}
                        phone={ctx.client_phone}
                        errors={ctx.field_errors}
                        submitting=submitting
                        on_submit=on_submit
                    />
                </section>
            })}
        </div>
    }
}
