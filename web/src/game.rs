use std::collections::HashMap;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use memoria_core as game;
use web_sys::{HtmlAudioElement, HtmlImageElement};
use yew::prelude::*;

use crate::assets::{self, AssetKind};
use crate::slicer;

/// Helper function to use JavaScript's Math.random
fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    AssetReady { kind: AssetKind, name: &'static str },
    CellActivated(game::CellId),
    ResolveDelay,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub config: game::GameConfig,
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    cell: game::BoardCell,
    cell_id: game::CellId,
    #[prop_or_default]
    tile_src: Option<AttrValue>,
    #[prop_or_default]
    closed_src: Option<AttrValue>,
    callback: Callback<game::CellId>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    use game::BoardCell::*;

    let class = classes!("cell", cell_classes(props.cell));
    let onclick = {
        let callback = props.callback.clone();
        let cell_id = props.cell_id;
        Callback::from(move |_: MouseEvent| callback.emit(cell_id))
    };

    let image = match props.cell {
        Empty => None,
        FaceDown(_) => props.closed_src.clone(),
        FaceUp(_) | Matched(_) => props.tile_src.clone(),
    };

    html! {
        <td {class} data-cellid={props.cell_id.to_string()} {onclick}>
            if let Some(src) = image {
                <img {src}/>
            }
        </td>
    }
}

fn cell_classes(cell: game::BoardCell) -> Classes {
    use game::BoardCell::*;
    match cell {
        Empty => classes!("empty"),
        FaceDown(_) => classes!(),
        FaceUp(_) => classes!("flipped"),
        Matched(_) => classes!("found"),
    }
}

/// The game controller: drives asset loading and tile slicing during setup,
/// then forwards cell activations to the board and turns its outcomes into
/// sounds, resolution timers, and rebuilds.
pub(crate) struct GameView {
    config: game::GameConfig,
    phase: game::GamePhase,
    pipeline: game::SetupPipeline,
    gfx_barrier: game::LoadBarrier,
    sfx_barrier: game::LoadBarrier,
    gfx: HashMap<&'static str, HtmlImageElement>,
    sfx: HashMap<&'static str, HtmlAudioElement>,
    tiles: Vec<AttrValue>,
    board: Option<game::BoardState>,
    seed: u64,
    _load_listeners: Vec<EventListener>,
}

impl GameView {
    /// Graphics leg of the setup pipeline: slice tiles from the loaded
    /// sheet, then deal the first board.
    fn on_graphics_loaded(&mut self) {
        self.phase = game::GamePhase::SlicingTiles;
        match self.slice_tiles() {
            Ok(tiles) => {
                log::debug!("sliced {} tiles", tiles.len());
                self.tiles = tiles;
            }
            Err(err) => {
                // Fatal to this initialization attempt; the join never fires.
                log::error!("tile slicing failed: {:?}", err);
                return;
            }
        }
        self.board = Some(self.build_board());
        let outcome = self.pipeline.mark_board_built();
        self.apply_pipeline(outcome);
    }

    fn slice_tiles(&self) -> Result<Vec<AttrValue>, wasm_bindgen::JsValue> {
        let sheet = self
            .gfx
            .get(game::asset_names::TILE_SHEET)
            .expect("sheet loads before slicing");
        let rects = game::slice_sheet(
            f64::from(sheet.natural_width()),
            f64::from(sheet.natural_height()),
            self.config.grid_tiles,
            self.config.max_unique_tiles,
        )
        .map_err(|err| wasm_bindgen::JsValue::from_str(&err.to_string()))?;
        slicer::chop_tiles(sheet, &rects)
    }

    fn build_board(&self) -> game::BoardState {
        use game::DeckGenerator;

        let deck = game::ShuffledDeckGenerator::new(self.seed)
            .generate(self.config.board, self.config.max_unique_tiles);
        game::BoardState::from_deck(self.config.board, deck)
    }

    fn apply_pipeline(&mut self, outcome: game::PipelineOutcome) {
        if outcome.is_ready() {
            self.phase = game::GamePhase::BoardReady;
            log::debug!("setup complete, board ready");
        }
    }

    fn on_asset_ready(&mut self, kind: AssetKind, name: &'static str) -> bool {
        log::trace!("{:?} resource ready: {}", kind, name);
        match kind {
            AssetKind::Audio => {
                if self.sfx_barrier.mark_ready(name).is_completed() {
                    let outcome = self.pipeline.mark_sounds_loaded();
                    self.apply_pipeline(outcome);
                }
            }
            AssetKind::Image => {
                if self.gfx_barrier.mark_ready(name).is_completed() {
                    self.on_graphics_loaded();
                }
            }
        }
        true
    }

    fn on_cell_activated(&mut self, ctx: &Context<Self>, cell_id: game::CellId) -> bool {
        if !self.phase.accepts_input() {
            return false;
        }
        let Some(board) = self.board.as_mut() else {
            return false;
        };
        let Some(coords) = board.coords_of(cell_id) else {
            return false;
        };

        let outcome = board.flip(coords);
        log::trace!("flip {:?} -> {:?}", coords, outcome);
        match outcome {
            game::FlipOutcome::Locked => false,
            game::FlipOutcome::Rejected => {
                self.play_sound(game::asset_names::FLIP_SOUND);
                false
            }
            game::FlipOutcome::Flipped(_) => {
                self.phase = game::GamePhase::Playing;
                self.play_sound(game::asset_names::FLIP_SOUND);
                true
            }
            game::FlipOutcome::MatchFound(_) => {
                // The match sound fires at detection, not after the delay.
                self.play_sound(game::asset_names::MATCH_SOUND);
                self.schedule_resolution(ctx);
                true
            }
            game::FlipOutcome::Mismatch(_) => {
                self.play_sound(game::asset_names::FLIP_SOUND);
                self.schedule_resolution(ctx);
                true
            }
        }
    }

    fn schedule_resolution(&mut self, ctx: &Context<Self>) {
        self.phase = game::GamePhase::Resolving;
        let link = ctx.link().clone();
        // Resolutions always fire; keeping the handle would let a drop
        // cancel the timer.
        Timeout::new(self.config.tile_reveal_delay_ms, move || {
            link.send_message(Msg::ResolveDelay)
        })
        .forget();
    }

    fn on_resolve_delay(&mut self) -> bool {
        let Some(board) = self.board.as_mut() else {
            return false;
        };
        let outcome = board.resolve();
        log::trace!("resolve -> {:?}", outcome);
        match outcome {
            game::ResolveOutcome::NoChange => false,
            game::ResolveOutcome::Matched(_) => {
                self.phase = game::GamePhase::Playing;
                true
            }
            game::ResolveOutcome::BoardComplete(_) => {
                self.rebuild_board();
                true
            }
            game::ResolveOutcome::Reverted(_) => {
                // The flip cue sounds a second time as the pair turns back
                // over; the double cue is deliberate.
                self.play_sound(game::asset_names::FLIP_SOUND);
                self.phase = game::GamePhase::Playing;
                true
            }
        }
    }

    /// All pairs found: deal a freshly shuffled deck onto a brand-new
    /// board, reusing the sliced tiles and loaded assets.
    fn rebuild_board(&mut self) {
        self.phase = game::GamePhase::Rebuilding;
        self.seed = js_random_seed();
        log::debug!("board complete, rebuilding with seed {}", self.seed);
        self.board = Some(self.build_board());
        self.phase = game::GamePhase::BoardReady;
    }

    fn play_sound(&self, name: &str) {
        if let Some(sound) = self.sfx.get(name) {
            // Playback yields a promise; failures surface in the console.
            let _ = sound.play();
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx.props().config.clone();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);

        let mut gfx = HashMap::new();
        let mut sfx = HashMap::new();
        let mut listeners = Vec::new();

        let on_image = ctx.link().callback(|name| Msg::AssetReady {
            kind: AssetKind::Image,
            name,
        });
        let on_audio = ctx.link().callback(|name| Msg::AssetReady {
            kind: AssetKind::Audio,
            name,
        });

        // Sound and graphics loads run concurrently; the graphics leg
        // continues into slicing and the first board build, and the
        // pipeline joins the two legs exactly once.
        let gfx_manifest = config.gfx_manifest();
        let sfx_manifest = config.sfx_manifest();
        listeners.extend(assets::load_images(&gfx_manifest, &mut gfx, &on_image));
        listeners.extend(assets::load_sounds(&sfx_manifest, &mut sfx, &on_audio));
        log::debug!(
            "loading {} graphics and {} sounds",
            gfx_manifest.len(),
            sfx_manifest.len()
        );

        Self {
            phase: game::GamePhase::LoadingAssets,
            pipeline: game::SetupPipeline::default(),
            gfx_barrier: game::LoadBarrier::new(gfx_manifest.iter().map(|(name, _)| *name)),
            sfx_barrier: game::LoadBarrier::new(sfx_manifest.iter().map(|(name, _)| *name)),
            config,
            gfx,
            sfx,
            tiles: Vec::new(),
            board: None,
            seed,
            _load_listeners: listeners,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AssetReady { kind, name } => self.on_asset_ready(kind, name),
            Msg::CellActivated(cell_id) => self.on_cell_activated(ctx, cell_id),
            Msg::ResolveDelay => self.on_resolve_delay(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(board) = self.board.as_ref() else {
            return html! { <div class="memory loading"/> };
        };

        let (cols, rows) = board.size();
        let closed_src = self
            .gfx
            .get(game::asset_names::CLOSED_TILE)
            .map(|image| AttrValue::from(image.src()));

        html! {
            <table class="memory">
                {
                    for (0..rows).map(|y| html! {
                        <tr data-row={y.to_string()}>
                            {
                                for (0..cols).map(|x| {
                                    let pos = (x, y);
                                    let cell = board.cell_at(pos);
                                    let cell_id = board.cell_id(pos);
                                    let tile_src = cell
                                        .tile_index()
                                        .and_then(|tile| self.tiles.get(usize::from(tile)))
                                        .cloned();
                                    let callback = ctx.link().callback(Msg::CellActivated);
                                    html! {
                                        <CellView {cell} {cell_id} {tile_src} closed_src={closed_src.clone()} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_classes_map_each_state_to_its_markup_class() {
        use game::BoardCell::*;

        assert_eq!(cell_classes(Empty), classes!("empty"));
        assert_eq!(cell_classes(FaceDown(3)), classes!());
        assert_eq!(cell_classes(FaceUp(3)), classes!("flipped"));
        assert_eq!(cell_classes(Matched(3)), classes!("found"));
    }
}
