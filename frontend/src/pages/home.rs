use yew::prelude::*;

use crate::components::portfolio_strip::PortfolioStrip;
use crate::components::reveal::Reveal;
use crate::components::services_carousel::ServicesCarousel;
use crate::hooks::use_scroll_persistence::use_scroll_persistence;

#[function_component(Home)]
pub fn home() -> Html {
    use_scroll_persistence("home".to_string());

    html! {
        <div class="home">
            <style>
                {r#"
                    .home {
                        background: #0d0d0d;
                        color: #f2f2f2;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    }
                    .hero {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        padding: 0 6vw;
                    }
                    .hero h1 {
                        font-size: clamp(2.5rem, 7vw, 6rem);
                        margin: 0;
                    }
                    .contact {
                        min-height: 70vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        align-items: center;
                        text-align: center;
                    }
                    .contact a {
                        color: #7fb5ff;
                        font-size: 1.5rem;
                    }
                "#}
            </style>
            <section class="hero">
                <Reveal>
                    <h1>{"Design and code,"}<br/>{"from one desk."}</h1>
                    <p>{"Independent designer and developer building brands and websites for small studios."}</p>
                </Reveal>
            </section>

            <ServicesCarousel />

            <PortfolioStrip />

            <section class="contact">
                <Reveal threshold={0.25}>
                    <h2>{"Have a project in mind?"}</h2>
                    <a href="mailto:hello@example.com">{"hello@example.com"}</a>
                </Reveal>
            </section>
        </div>
    }
}
