pub mod config;
pub mod pages;
pub mod styles;
pub mod tiles;

use yew::prelude::*;
use crate::pages::frontend_2048_game::Frontend2048Game;

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_memo((), |_| config::load_settings());

    html! {
        <div class={styles::CONTAINER}>
            <Frontend2048Game settings={*settings} />
        </div>
    }
}
