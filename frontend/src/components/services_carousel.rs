use std::rc::Rc;

use yew::prelude::*;

use crate::config::ScrollTuning;
use crate::hooks::use_locked_horizontal_scroll::{
    use_locked_horizontal_scroll, LockedHorizontalScrollOptions,
};

const SERVICES: &[(&str, &str)] = &[
    (
        "Brand identity",
        "Logos, type systems and the small rules that keep a brand recognisable everywhere it shows up.",
    ),
    (
        "Web design",
        "Layouts that read well on a phone first and still feel generous on a wide screen.",
    ),
    (
        "Development",
        "Fast, accessible sites built to be edited by you, not just by me.",
    ),
];

// Must match the flex gap below.
const GAP: f64 = 32.0;

#[function_component(ServicesCarousel)]
pub fn services_carousel() -> Html {
    let tuning = use_context::<Rc<ScrollTuning>>().unwrap_or_default();
    let container = use_node_ref();
    let wrapper = use_node_ref();
    let carousel = use_locked_horizontal_scroll(
        container.clone(),
        wrapper.clone(),
        LockedHorizontalScrollOptions {
            section_count: SERVICES.len(),
            gap: GAP,
            tuning,
        },
    );

    let previous = {
        let jump = carousel.jump_to_section.clone();
        let current = carousel.current_section;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            jump.emit(current.saturating_sub(1));
        })
    };
    let next = {
        let jump = carousel.jump_to_section.clone();
        let current = carousel.current_section;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            jump.emit(current + 1);
        })
    };

    html! {
        <section class="services" ref={wrapper}>
            <style>
                {r#"
                    .services {
                        min-height: 80vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        padding: 0 6vw;
                    }
                    .services-viewport {
                        overflow: hidden;
                        width: 100%;
                    }
                    .services-track {
                        transition: transform 0.08s linear;
                    }
                    .service-card {
                        flex: 0 0 100%;
                        min-height: 50vh;
                        padding: 3rem;
                        border-radius: 24px;
                        background: rgba(20, 20, 20, 0.9);
                        color: #f2f2f2;
                        opacity: 0.5;
                        transition: opacity 0.3s ease;
                    }
                    .service-card.active {
                        opacity: 1;
                    }
                    .service-index {
                        font-size: 0.9rem;
                        color: #7fb5ff;
                    }
                    .services-controls {
                        display: flex;
                        align-items: center;
                        gap: 1rem;
                        margin-top: 1.5rem;
                    }
                    .services-dot {
                        width: 10px;
                        height: 10px;
                        border-radius: 50%;
                        border: none;
                        background: #555;
                        cursor: pointer;
                    }
                    .services-dot.active {
                        background: #7fb5ff;
                    }
                "#}
            </style>
            <div class="services-viewport" ref={container}>
                <div class="services-track" style={carousel.track_style(GAP)}>
                    {
                        for SERVICES.iter().enumerate().map(|(i, (title, body))| {
                            html! {
                                <article class={classes!("service-card", (i == carousel.current_section).then(|| "active"))}>
                                    <span class="service-index">{format!("{:02}", i + 1)}</span>
                                    <h3>{*title}</h3>
                                    <p>{*body}</p>
                                </article>
                            }
                        })
                    }
                </div>
            </div>
            <div class="services-controls">
                <button class="services-arrow" onclick={previous} disabled={carousel.is_at_start}>{"←"}</button>
                {
                    for (0..SERVICES.len()).map(|i| {
                        let jump = carousel.jump_to_section.clone();
                        let onclick = Callback::from(move |_: MouseEvent| jump.emit(i));
                        html! {
                            <button
                                class={classes!("services-dot", (i == carousel.current_section).then(|| "active"))}
                                aria-label={format!("Show service {}", i + 1)}
                                {onclick}
                            />
                        }
                    })
                }
                <button class="services-arrow" onclick={next} disabled={carousel.is_at_end}>{"→"}</button>
            </div>
        </section>
    }
}
