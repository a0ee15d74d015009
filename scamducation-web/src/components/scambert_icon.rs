use yew::prelude::*;

/// Which costume Scambert wears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    #[default]
    Scammer,
    Lecturer,
    Mega,
    Boss,
}

impl IconMode {
    const fn class(self) -> &'static str {
        match self {
            Self::Scammer => "sb-scambert--scammer",
            Self::Lecturer => "sb-scambert--lecturer",
            Self::Mega => "sb-scambert--mega",
            Self::Boss => "sb-scambert--boss",
        }
    }

    const fn body_fill(self) -> &'static str {
        match self {
            Self::Scammer | Self::Lecturer => "#f59e0b",
            Self::Mega => "#facc15",
            Self::Boss => "#dc2626",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or(80)]
    pub size: u32,
    #[prop_or_default]
    pub mode: IconMode,
    #[prop_or(true)]
    pub animate: bool,
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

#[function_component(ScambertIcon)]
pub fn scambert_icon(props: &Props) -> Html {
    let class = classes!(
        "sb-scambert",
        props.mode.class(),
        props.animate.then_some("sb-scambert--animated"),
    );
    let size = props.size.to_string();
    let hat = match props.mode {
        IconMode::Scammer => html! { <rect x="30" y="8" width="40" height="14" rx="3" fill="#1f2937" /> },
        IconMode::Lecturer => html! { <polygon points="20,18 50,6 80,18 50,30" fill="#1f2937" /> },
        IconMode::Mega => html! { <polygon points="28,22 34,6 42,18 50,4 58,18 66,6 72,22" fill="#eab308" /> },
        IconMode::Boss => html! { <polygon points="26,24 32,4 40,20 60,20 68,4 74,24" fill="#7f1d1d" /> },
    };
    html! {
        <svg
            class={class}
            width={size.clone()}
            height={size}
            viewBox="0 0 100 100"
            role="img"
            aria-label={props.label.clone().unwrap_or_else(|| AttrValue::from("Scambert"))}
        >
            <ellipse cx="50" cy="60" rx="36" ry="32" fill={props.mode.body_fill()} />
            <circle class="sb-scambert__eye" cx="38" cy="52" r="6" fill="#ffffff" />
            <circle class="sb-scambert__eye" cx="62" cy="52" r="6" fill="#ffffff" />
            <circle cx="39" cy="53" r="3" fill="#111827" />
            <circle cx="63" cy="53" r="3" fill="#111827" />
            <path d="M36 72 Q50 82 64 72" stroke="#111827" stroke-width="3" fill="none" />
            { hat }
        </svg>
    }
}
