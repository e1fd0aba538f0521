use std::rc::Rc;

use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod scroll {
    pub mod attachment;
    pub mod dom;
    pub mod geometry;
    pub mod lock;
}
mod hooks {
    pub mod use_horizontal_scroll;
    pub mod use_locked_horizontal_scroll;
    pub mod use_scroll_animation;
    pub mod use_scroll_persistence;
}
mod components {
    pub mod portfolio_strip;
    pub mod reveal;
    pub mod services_carousel;
}
mod pages {
    pub mod home;
    pub mod not_found;
}

use config::ScrollTuning;
use pages::{home::Home, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let tuning: Rc<ScrollTuning> = use_memo(|_| ScrollTuning::load(), ());

    html! {
        <ContextProvider<Rc<ScrollTuning>> context={tuning}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<Rc<ScrollTuning>>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
