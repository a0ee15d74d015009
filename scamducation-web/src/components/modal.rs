use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with(props.open, move |is_open| {
            if *is_open && let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.set_attribute("tabindex", "-1");
                let _ = el.focus();
            }
            || {}
        });
    }

    if !props.open {
        return Html::default();
    }

    let title_id = format!("sb-modal-title-{}", *modal_id);
    let desc_id = format!("sb-modal-desc-{}", *modal_id);

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="sb-dialog-backdrop" role="presentation" onclick={on_close.clone()}>
            <div
                class="sb-modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                aria-describedby={props.description.as_ref().map(|_| desc_id.clone())}
                onkeydown={on_keydown}
                onclick={stop}
                ref={container_ref}
            >
                <div class="sb-modal__header">
                    <h2 id={title_id}>{ props.title.clone() }</h2>
                    <button type="button" class="sb-modal__close" aria-label="Close dialog" onclick={on_close}>
                        {"X"}
                    </button>
                </div>
                { props.description.as_ref().map(|desc| html! {
                    <p id={desc_id.clone()} class="sb-modal__description">{ desc.clone() }</p>
                }).unwrap_or_default() }
                <div class="sb-modal__body">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
