use yew::prelude::*;

use crate::hooks::use_scroll_animation::{use_scroll_animation, ScrollAnimationOptions};

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    pub children: Children,
    #[prop_or(0.15)]
    pub threshold: f64,
    #[prop_or(80)]
    pub delay_ms: u32,
    #[prop_or(true)]
    pub once: bool,
}

/// Fades its children in once they scroll into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_scroll_animation(
        node.clone(),
        ScrollAnimationOptions {
            threshold: props.threshold,
            delay_ms: props.delay_ms,
            once: props.once,
        },
    );

    html! {
        <div ref={node} class={classes!("reveal", visible.then(|| "visible"))}>
            <style>
                {r#"
                    .reveal {
                        opacity: 0;
                        transform: translateY(24px);
                        transition: opacity 0.6s ease, transform 0.6s ease;
                    }
                    .reveal.visible {
                        opacity: 1;
                        transform: none;
                    }
                "#}
            </style>
            { for props.children.iter() }
        </div>
    }
}
