use dioxus::prelude::*;

use ui::{use_auth, AuthProvider, NotificationProvider, NotificationTray};

use views::{
    Health, Home, Login, MedicalRecords, MedicationRecords, NotFound, PhysicalExamReport,
    PhysicalExams, Profile, Register, Settings, VaccinationRecords,
};

mod guard;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/login?:redirect")]
    Login { redirect: String },
    #[route("/register")]
    Register {},
    #[route("/health")]
    Health {},
    #[layout(Protected)]
        #[route("/")]
        Home {},
        #[route("/medical-records")]
        MedicalRecords {},
        #[route("/medication-records")]
        MedicationRecords {},
        #[route("/vaccination-records")]
        VaccinationRecords {},
        #[route("/physical-exams")]
        PhysicalExams {},
        #[route("/physical-exams/:id/report")]
        PhysicalExamReport { id: u64 },
        #[route("/profile")]
        Profile {},
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        NotificationProvider {
            AuthProvider {
                NotificationTray {}
                Router::<Route> {}
            }
        }
    }
}

/// Layout wrapping every route that needs a session. Consults the guard
/// before rendering and redirects instead when the session does not fit.
#[component]
fn Protected() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "app-loading", "Loading\u{2026}" }
        };
    }

    let path = route.to_string();
    match guard::decide(&path, guard::requires_auth(&path), state.is_authenticated()) {
        guard::NavDecision::Allow => {}
        guard::NavDecision::ToLogin { redirect } => {
            nav.replace(Route::Login { redirect });
            return rsx! {};
        }
        guard::NavDecision::ToHome => {
            nav.replace(Route::Home {});
            return rsx! {};
        }
    }

    let username = state
        .user
        .as_ref()
        .map(|u| u.username.clone())
        .unwrap_or_default();

    rsx! {
        ui::Navbar {
            Link { class: "brand", to: Route::Home {}, "Health Records" }
            nav {
                class: "nav-links",
                Link { to: Route::MedicalRecords {}, "Visits" }
                Link { to: Route::MedicationRecords {}, "Medications" }
                Link { to: Route::VaccinationRecords {}, "Vaccinations" }
                Link { to: Route::PhysicalExams {}, "Exams" }
            }
            div {
                class: "nav-user",
                Link { to: Route::Profile {}, "{username}" }
                Link { class: "nav-settings", to: Route::Settings {}, "Settings" }
            }
        }
        main {
            class: "app-main",
            Outlet::<Route> {}
        }
    }
}
