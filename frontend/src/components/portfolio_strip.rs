use yew::prelude::*;

use crate::hooks::use_horizontal_scroll::use_horizontal_scroll;

const PROJECTS: &[(&str, &str, &str)] = &[
    ("Nordlys Coffee", "Identity & packaging", "/assets/portfolio/nordlys.jpg"),
    ("Atelier Vik", "Portfolio site", "/assets/portfolio/atelier-vik.jpg"),
    ("Fjell Outdoor", "E-commerce redesign", "/assets/portfolio/fjell.jpg"),
    ("Studio Havn", "Booking app", "/assets/portfolio/havn.jpg"),
];

const GAP: f64 = 24.0;

#[function_component(PortfolioStrip)]
pub fn portfolio_strip() -> Html {
    let section = use_node_ref();
    let frame = use_node_ref();
    let strip = use_horizontal_scroll(section.clone(), frame.clone(), PROJECTS.len(), GAP);

    let track_style = format!(
        "display: flex; gap: {}px; transform: translate3d({}px, 0, 0);",
        GAP, -strip.progress
    );

    html! {
        <section class="portfolio" ref={section} style={strip.section_height_style()}>
            <style>
                {r#"
                    .portfolio-sticky {
                        position: sticky;
                        top: 0;
                        height: 100vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        overflow: hidden;
                        padding: 0 6vw;
                    }
                    .portfolio-frame {
                        width: 100%;
                    }
                    .project {
                        flex: 0 0 100%;
                        height: 60vh;
                        border-radius: 24px;
                        background-size: cover;
                        background-position: center;
                        display: flex;
                        align-items: flex-end;
                        padding: 2rem;
                        color: white;
                    }
                    .portfolio-counter {
                        margin-top: 1rem;
                        color: #999;
                    }
                "#}
            </style>
            <div class="portfolio-sticky">
                <h2>{"Selected work"}</h2>
                <div class="portfolio-frame" ref={frame}>
                    <div class="portfolio-track" style={track_style}>
                        {
                            for PROJECTS.iter().map(|(name, kind, image)| html! {
                                <article class="project" style={format!("background-image: url('{}');", image)}>
                                    <div>
                                        <h3>{*name}</h3>
                                        <p>{*kind}</p>
                                    </div>
                                </article>
                            })
                        }
                    </div>
                </div>
                <p class="portfolio-counter">
                    {format!("{} / {}", strip.current_section + 1, PROJECTS.len())}
                </p>
            </div>
        </section>
    }
}
