use yew::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, TouchEvent};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use shared::constants::{GAME_OVER_MESSAGE, GRID_SIZE, SCORE_LABEL};
use shared::grid::Direction;
use shared::input::{direction_for_key, direction_for_swipe, MoveGate, MoveTicket};
use shared::settings::GameSettings;
use shared::shared_2048_game::{Game2048, GameStatus};
use crate::config::now_ms;
use crate::styles;
use crate::tiles::{DisplayTile, TileLayer, TileState};

#[derive(Properties, PartialEq)]
pub struct Frontend2048GameProps {
    #[prop_or_default]
    pub settings: GameSettings,
}

pub enum Msg {
    Move(Direction),
    Settled(MoveTicket),
    NewGame,
    TouchStart(f64, f64),
    TouchEnd(f64, f64),
}

pub struct Frontend2048Game {
    game: Game2048,
    tiles: TileLayer,
    gate: MoveGate,
    settings: GameSettings,
    // Dropping the timer cancels the pending settle.
    settle_timer: Option<Timeout>,
    touch_start: Option<(f64, f64)>,
    _keydown_listener: Option<EventListener>,
    _touchstart_listener: Option<EventListener>,
    _touchend_listener: Option<EventListener>,
}

impl Component for Frontend2048Game {
    type Message = Msg;
    type Properties = Frontend2048GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings = ctx.props().settings;
        let game = Game2048::new();
        let tiles = TileLayer::from_grid(game.grid());

        Self {
            game,
            tiles,
            gate: MoveGate::new(settings.min_move_interval_ms),
            settings,
            settle_timer: None,
            touch_start: None,
            _keydown_listener: None,
            _touchstart_listener: None,
            _touchend_listener: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.settings = ctx.props().settings;
        self.settle_timer = None;
        self.gate = MoveGate::new(self.settings.min_move_interval_ms);
        self.tiles.settle();
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            warn!("no document available, input listeners not attached");
            return;
        };

        let options = EventListenerOptions {
            passive: false,
            phase: EventListenerPhase::Bubble,
        };

        let link = ctx.link().clone();
        self._keydown_listener = Some(EventListener::new_with_options(&document, "keydown", options, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else { return };
            if event.repeat() {
                return;
            }
            if let Some(direction) = direction_for_key(&event.key()) {
                event.prevent_default();
                link.send_message(Msg::Move(direction));
            }
        }));

        let link = ctx.link().clone();
        self._touchstart_listener = Some(EventListener::new_with_options(&document, "touchstart", options, move |event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else { return };
            if let Some(touch) = event.touches().get(0) {
                link.send_message(Msg::TouchStart(touch.client_x() as f64, touch.client_y() as f64));
            }
        }));

        let link = ctx.link().clone();
        self._touchend_listener = Some(EventListener::new_with_options(&document, "touchend", options, move |event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else { return };
            if let Some(touch) = event.changed_touches().get(0) {
                link.send_message(Msg::TouchEnd(touch.client_x() as f64, touch.client_y() as f64));
            }
        }));
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Move(direction) => self.handle_move(ctx, direction),
            Msg::Settled(ticket) => {
                if !self.gate.finish(ticket) {
                    return false;
                }
                debug!("move {:?} settled", ticket);
                self.settle_timer = None;
                self.tiles.settle();
                true
            }
            Msg::NewGame => {
                self.settle_timer = None;
                self.gate.reset();
                self.game.restart();
                self.tiles.reset(self.game.grid());
                info!("board reset");
                true
            }
            Msg::TouchStart(x, y) => {
                self.touch_start = Some((x, y));
                false
            }
            Msg::TouchEnd(x, y) => {
                let Some((start_x, start_y)) = self.touch_start.take() else {
                    return false;
                };
                match direction_for_swipe(x - start_x, y - start_y) {
                    Some(direction) => self.handle_move(ctx, direction),
                    None => false,
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_new_game = ctx.link().callback(|_| Msg::NewGame);
        let public = self.game.to_public();
        let board_style = format!("width: {0}px; height: {0}px;", styles::board_size_px(GRID_SIZE));

        html! {
            <div class="flex flex-col items-center w-full">
                <div class={styles::CARD}>
                    <h1 class={styles::TEXT_H1}>{ "2048" }</h1>
                    <p class={styles::TEXT_BODY}>
                        { "Use arrow keys, WASD, IJKL, or numpad 8426. On mobile, swipe to move." }
                    </p>
                    <div class="flex justify-center mb-6">
                        <button onclick={on_new_game} class={styles::BUTTON_PRIMARY}>
                            { "New Game" }
                        </button>
                    </div>
                    <div class={styles::BOARD} style={board_style}>
                        <div class="absolute inset-0">
                            { for (0..GRID_SIZE * GRID_SIZE).map(|i| view_cell(i % GRID_SIZE, i / GRID_SIZE)) }
                        </div>
                        <div class="absolute inset-0">
                            { for self.tiles.tiles().iter().map(|tile| self.view_tile(tile)) }
                        </div>
                        if public.game_over {
                            <div class={styles::GAME_OVER}>{ GAME_OVER_MESSAGE }</div>
                        }
                    </div>
                    <p class={styles::SCORE}>{ format!("{}: {}", SCORE_LABEL, public.score) }</p>
                </div>
            </div>
        }
    }
}

impl Frontend2048Game {
    /// Runs one move through the gate, the engine and the tile layer.
    /// Returns whether the board needs a redraw.
    fn handle_move(&mut self, ctx: &Context<Self>, direction: Direction) -> bool {
        if self.game.is_over() {
            return false;
        }

        if self.gate.is_busy() {
            debug!("dropping {} input: previous move still settling", direction);
            return false;
        }
        let ticket = match self.gate.try_begin(now_ms()) {
            Ok(ticket) => ticket,
            Err(err) => {
                debug!("dropping {} input: {}", direction, err);
                return false;
            }
        };

        let turn = match self.game.make_move(direction) {
            Ok(turn) => turn,
            Err(err) => {
                warn!("move rejected: {}", err);
                self.gate.finish(ticket);
                return false;
            }
        };
        if !turn.changed() {
            self.gate.finish(ticket);
            return false;
        }

        self.tiles.apply(&turn);
        if !self.tiles.matches(self.game.grid()) {
            warn!("tile layer out of sync with the grid, redrawing");
            self.tiles.reset(self.game.grid());
        }
        if turn.status == GameStatus::GameOver {
            info!("game over, final score {}", self.game.score());
        }

        let settle_ms = self.settings.settle_ms();
        if settle_ms == 0 {
            self.tiles.settle();
            self.gate.finish(ticket);
        } else {
            let link = ctx.link().clone();
            self.settle_timer = Some(Timeout::new(settle_ms, move || {
                link.send_message(Msg::Settled(ticket));
            }));
        }
        true
    }

    fn view_tile(&self, tile: &DisplayTile) -> Html {
        let transition = if self.settings.animate {
            format!("transition: transform {}ms ease-in-out;", self.settings.animation_ms)
        } else {
            String::new()
        };
        let style = format!(
            "width: {size}px; height: {size}px; transform: translate({x}px, {y}px); background-color: {bg}; color: {fg}; {transition}",
            size = styles::CELL_SIZE_PX,
            x = styles::cell_offset(tile.position.x),
            y = styles::cell_offset(tile.position.y),
            bg = styles::tile_background(tile.value),
            fg = styles::tile_text_color(tile.value),
            transition = transition,
        );
        let state_class = match tile.state {
            TileState::Idle => "z-10",
            TileState::New => styles::TILE_NEW,
            TileState::Merged => styles::TILE_MERGED,
            TileState::Absorbed => styles::TILE_ABSORBED,
        };

        html! {
            <div
                key={tile.id}
                class={classes!(styles::TILE, styles::tile_font_class(tile.value), state_class)}
                style={style}
            >
                { tile.value }
            </div>
        }
    }
}

fn view_cell(x: usize, y: usize) -> Html {
    let style = format!(
        "width: {size}px; height: {size}px; transform: translate({x}px, {y}px); background-color: {bg};",
        size = styles::CELL_SIZE_PX,
        x = styles::cell_offset(x),
        y = styles::cell_offset(y),
        bg = styles::EMPTY_CELL_COLOR,
    );
    html! { <div class={styles::CELL} style={style}></div> }
}
