//! Astro Dodge entry point
//!
//! Platform drivers around the simulation core: a DOM-backed render sink
//! plus input wiring on wasm32, and a headless demo loop on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use astro_dodge::RawConfig;
    use astro_dodge::config::Config;
    use astro_dodge::consts::PLAYER_SIZE;
    use astro_dodge::sim::{Phase, Session, TickInput, tick};
    use astro_dodge::view::{RenderSink, Snapshot, SpriteView, life_hearts, severity_color};

    /// DOM-backed render sink. Owns the id-keyed table of sprite elements;
    /// the simulation only ever sees ids and positions.
    struct DomSink {
        document: Document,
        field: HtmlElement,
        player: HtmlElement,
        life_display: Element,
        time_display: Element,
        message_log: HtmlElement,
        config_panel: Element,
        config_toggle: Element,
        sprites: HashMap<u32, Element>,
    }

    impl DomSink {
        fn new(document: &Document) -> Option<Self> {
            let get = |id: &str| document.get_element_by_id(id);
            Some(Self {
                document: document.clone(),
                field: get("game-area")?.dyn_into().ok()?,
                player: get("player")?.dyn_into().ok()?,
                life_display: get("life-display")?,
                time_display: get("time-display")?,
                message_log: get("message-log")?.dyn_into().ok()?,
                config_panel: get("config-panel")?,
                config_toggle: get("config-toggle")?,
                sprites: HashMap::new(),
            })
        }

        /// Mirror the published sprites: create elements on first sight,
        /// move the live ones, detach handles whose entity is gone
        fn sync_sprites(&mut self, views: &[&SpriteView]) {
            for view in views {
                let element = match self.sprites.get(&view.id) {
                    Some(el) => el.clone(),
                    None => match self.create_sprite(view) {
                        Some(el) => el,
                        None => continue,
                    },
                };
                let _ = element.set_attribute(
                    "style",
                    &format!(
                        "width: {s}px; height: {s}px; transform: translate({x}px, {y}px)",
                        s = view.size,
                        x = view.pos.x,
                        y = view.pos.y
                    ),
                );
            }
            self.sprites.retain(|id, element| {
                let live = views.iter().any(|v| v.id == *id);
                if !live {
                    element.remove();
                }
                live
            });
        }

        fn create_sprite(&mut self, view: &SpriteView) -> Option<Element> {
            let element = self.document.create_element("div").ok()?;
            element.set_class_name(&format!("character {}", view.style));
            self.field.append_child(&element).ok()?;
            self.sprites.insert(view.id, element.clone());
            Some(element)
        }
    }

    impl RenderSink for DomSink {
        fn present(&mut self, snapshot: &Snapshot) {
            let _ = self.player.style().set_property(
                "transform",
                &format!(
                    "translate({}px, {}px)",
                    snapshot.player_pos.x, snapshot.player_pos.y
                ),
            );
            let _ = if snapshot.invulnerable {
                self.player.class_list().add_1("flashing")
            } else {
                self.player.class_list().remove_1("flashing")
            };

            let views: Vec<&SpriteView> = snapshot
                .obstacles
                .iter()
                .chain(snapshot.pickups.iter())
                .collect();
            self.sync_sprites(&views);

            self.life_display
                .set_text_content(Some(&life_hearts(snapshot.life, snapshot.max_life)));
            self.time_display
                .set_text_content(Some(&snapshot.score.to_string()));
            self.message_log.set_text_content(Some(&snapshot.message));
            let _ = self
                .message_log
                .style()
                .set_property("color", severity_color(snapshot.severity));

            // Pause markers: settings panel, field border, toggle label
            let running = snapshot.phase == Phase::Running;
            let _ = if running {
                self.config_panel.class_list().add_1("hidden")
            } else {
                self.config_panel.class_list().remove_1("hidden")
            };
            let _ = self.field.style().set_property(
                "border",
                if running {
                    "5px solid #3498db"
                } else {
                    "5px solid #e67e22"
                },
            );
            self.config_toggle.set_text_content(Some(if running {
                "\u{2699}\u{fe0f} Settings (ENTER)"
            } else {
                "\u{25b6}\u{fe0f} Resume (ENTER)"
            }));
        }
    }

    /// Game instance holding the session, its sink and the sampled input
    struct Game {
        session: Session,
        sink: DomSink,
        input: TickInput,
    }

    impl Game {
        fn frame(&mut self) {
            let input = self.input;
            tick(&mut self.session, &input);
            // Clear one-shot inputs after processing
            self.input.toggle = false;
            self.sink.present(&Snapshot::capture(&self.session));
        }
    }

    /// Read the three tunables from the settings form. Unparseable input is
    /// passed through as absent and clamps to the range minimum.
    fn read_raw_config(document: &Document) -> RawConfig {
        let field = |id: &str| -> Option<i64> {
            let input: HtmlInputElement = document.get_element_by_id(id)?.dyn_into().ok()?;
            input.value().trim().parse().ok()
        };
        RawConfig::new(
            field("num-enemies"),
            field("speed-factor"),
            field("start-life"),
        )
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Astro Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let sink = match DomSink::new(&document) {
            Some(sink) => sink,
            None => {
                log::error!("game elements missing from the page, aborting");
                return;
            }
        };

        // Size the player sprite once; everything else follows snapshots
        let _ = sink
            .player
            .style()
            .set_property("width", &format!("{PLAYER_SIZE}px"));
        let _ = sink
            .player
            .style()
            .set_property("height", &format!("{PLAYER_SIZE}px"));

        let seed = js_sys::Date::now() as u64;
        let mut session = Session::new(Config::default(), seed);
        // Pick up whatever the settings form holds on load
        session.apply_config(&read_raw_config(&document));
        log::info!("Session initialized with seed: {seed}");

        let game = Rc::new(RefCell::new(Game {
            session,
            sink,
            input: TickInput::default(),
        }));

        setup_input_handlers(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Astro Dodge running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Pointer tracking over the play field
        if let Some(field) = document.get_element_by_id("game-area") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let rect = g.sink.field.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                g.input.pointer = Some(Vec2::new(x, y));
            });
            let _ = field
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Enter/Space toggles pause
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        game.borrow_mut().input.toggle = true;
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Settings toggle button doubles as pause/resume
        if let Some(btn) = document.get_element_by_id("config-toggle") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.toggle = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Apply button: clamp the form values and restart the session
        if let Some(btn) = document.get_element_by_id("apply-config") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let raw = read_raw_config(&document);
                game.borrow_mut().session.apply_config(&raw);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use astro_dodge::config::Config;
    use astro_dodge::sim::{Phase, Session, TickInput, tick};
    use astro_dodge::view::Snapshot;

    env_logger::init();
    log::info!("Astro Dodge (native) starting...");

    // Headless demo: the obstacles converge on a stationary player until the
    // run ends, then the final snapshot is dumped. Playable in the web build.
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let mut session = Session::new(Config::default(), seed);
    session.resume();

    let input = TickInput::default();
    while session.phase == Phase::Running {
        tick(&mut session, &input);
    }

    match serde_json::to_string_pretty(&Snapshot::capture(&session)) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
    log::info!("survived {}s", session.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
