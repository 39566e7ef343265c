//! Root application component with routing and the auth provider.
//!
//! ARCHITECTURE
//! ============
//! `Routes` stays outside any conditional so the server can always enumerate
//! the route list. The auth provider lives in the shared layout route, which
//! stays mounted across navigation, so the session check runs once per page
//! load and every page renders only after it settles.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Outlet, ParentRoute, Route, Router, Routes},
};

use crate::components::{auth_provider::AuthProvider, footer::Footer, navbar::Navbar, protected_route::ProtectedRoute};
use crate::pages::{
    dashboard::DashboardPage, home::HomePage, itinerary::ViewItineraryPage, login::LoginPage, not_found::NotFoundPage,
    plan::PlanTravelPage, register::RegisterPage,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="ko">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/wayfarer.css"/>
        <Title text="Wayfarer"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <ParentRoute path=StaticSegment("") view=AppLayout>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("plan")
                        view=|| view! { <ProtectedRoute><PlanTravelPage/></ProtectedRoute> }
                    />
                    <Route path=(StaticSegment("itinerary"), ParamSegment("id")) view=ViewItineraryPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}

#[component]
fn AppLayout() -> impl IntoView {
    view! {
        <AuthProvider>
            <div class="app-shell">
                <Navbar/>
                <main class="app-main">
                    <Outlet/>
                </main>
                <Footer/>
            </div>
        </AuthProvider>
    }
}
