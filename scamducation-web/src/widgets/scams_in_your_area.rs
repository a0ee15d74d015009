use crate::components::scambert_icon::ScambertIcon;
use serde::Deserialize;
use yew::prelude::*;

pub const REGION_LOOKUP_URL: &str = "https://ipapi.co/json/";
const HEADING: &str = "Scams in your area";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionLookup {
    #[serde(default)]
    pub region: Option<String>,
}

/// Card heading, personalised once the visitor's region is known.
#[must_use]
pub fn heading_for(region: Option<&str>) -> String {
    match region.map(str::trim).filter(|r| !r.is_empty()) {
        Some(region) => format!("{HEADING}: {region}"),
        None => HEADING.to_string(),
    }
}

const DONTS: [&str; 2] = [
    "Banks never ask for approvals over the phone",
    "Don't approve anything in banking app during a call",
];
const DOS: [&str; 2] = [
    "Hang up and call the bank yourself",
    "Use the bank's official number (not the caller's)",
];

#[function_component(ScamsInYourArea)]
pub fn scams_in_your_area() -> Html {
    let region = use_state(|| None::<String>);

    {
        let region = region.clone();
        use_effect_with((), move |()| {
            #[cfg(target_arch = "wasm32")]
            wasm_bindgen_futures::spawn_local(async move {
                match crate::dom::fetch_json::<RegionLookup>(REGION_LOOKUP_URL).await {
                    Ok(lookup) => region.set(lookup.region),
                    Err(err) => log::warn!(
                        "region lookup failed: {}",
                        crate::dom::js_error_message(&err)
                    ),
                }
            });
            #[cfg(not(target_arch = "wasm32"))]
            let _ = region;
            || {}
        });
    }

    html! {
        <section class="sb-area-card" aria-labelledby="sb-area-heading">
            <header class="sb-area-card__header">
                <ScambertIcon size={28} />
                <h2 id="sb-area-heading">{ heading_for(region.as_deref()) }</h2>
            </header>
            <div class="sb-area-card__body">
                <p class="sb-area-card__warning">{ "WARNING: Bank Impersonation Scam" }</p>
                <p class="sb-area-card__label">{ "What happened:" }</p>
                <div class="sb-area-card__details">
                    <p><span class="font-semibold">{ "Victim:" }</span>{ " Woman born in the 1960s, Joensuu" }</p>
                    <p><span class="font-semibold">{ "Date:" }</span>{ " September 13" }</p>
                    <p>
                        <span class="font-semibold">{ "Method:" }</span>
                        { " Caller claimed to be an OP Bank representative, spoke fluent Finnish, and said her online banking needed an \"update.\" She approved something on her phone during 4 separate calls." }
                    </p>
                </div>
                <div class="sb-area-card__result">
                    <p>{ "Result: €170,000 stolen from her account" }</p>
                </div>
                <p class="sb-area-card__label">{ "Remember:" }</p>
                <ul class="sb-area-card__tips">
                    { for DONTS.iter().map(|tip| html! { <li class="sb-tip sb-tip--dont">{ format!("❌ {tip}") }</li> }) }
                    { for DOS.iter().map(|tip| html! { <li class="sb-tip sb-tip--do">{ format!("✅ {tip}") }</li> }) }
                </ul>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_uses_region_when_known() {
        assert_eq!(heading_for(None), "Scams in your area");
        assert_eq!(heading_for(Some("  ")), "Scams in your area");
        assert_eq!(heading_for(Some("North Karelia")), "Scams in your area: North Karelia");
    }

    #[test]
    fn lookup_tolerates_missing_region() {
        let lookup: RegionLookup = serde_json::from_str(r#"{"ip":"127.0.0.1"}"#).unwrap();
        assert_eq!(lookup.region, None);
    }
}
