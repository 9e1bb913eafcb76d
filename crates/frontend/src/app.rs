//! Main application component with routing.

use layout_types::DashboardConfig;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::DashboardPage;

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Route switch function.
fn switch(routes: Route) -> Html {
    match routes {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound => html! {
            <div class="card">
                <h1>{"404 - Page Not Found"}</h1>
                <p>{"The page you're looking for doesn't exist."}</p>
                <Link<Route> to={Route::Dashboard}>{"Back to the dashboard"}</Link<Route>>
            </div>
        },
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let config = DashboardConfig::default();

    html! {
        <BrowserRouter>
            <ContextProvider<DashboardConfig> context={config}>
                <div class="app-container">
                    <main class="main-content">
                        <Switch<Route> render={switch} />
                    </main>
                </div>
            </ContextProvider<DashboardConfig>>
        </BrowserRouter>
    }
}
