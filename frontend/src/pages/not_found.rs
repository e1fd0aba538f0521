use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found" style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #0d0d0d; color: #f2f2f2;">
            <h1>{"404"}</h1>
            <p>{"This page scrolled away."}</p>
            <Link<Route> to={Route::Home}>
                {"Back to the start"}
            </Link<Route>>
        </div>
    }
}
