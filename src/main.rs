#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use map_lab::state::{JsonFileStore, MapSnapshot};
    use map_lab::{EditorConfig, MapLabApp};

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Args::parse(std::env::args().skip(1));
    let config = EditorConfig::from_env();

    let store = args.snapshot_path.map(JsonFileStore::new);
    let snapshot: Option<MapSnapshot> = store
        .as_ref()
        .filter(|store| store.exists())
        .and_then(|store| match store.load() {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::error!("{}", err);
                None
            }
        });
    let save_handler: Box<dyn map_lab::SaveHandler> = match store {
        Some(store) => Box::new(store),
        None => Box::new(|snapshot: MapSnapshot| match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("{}", err),
        }),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Map Lab")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Map Lab",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(MapLabApp::from_creation_context(
                cc,
                snapshot,
                args.read_only,
                config,
                save_handler,
            )))
        }),
    )
}

/// `map_lab [--read-only] [snapshot.json]`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
struct Args {
    read_only: bool,
    snapshot_path: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        for arg in args {
            match arg.as_str() {
                "--read-only" => parsed.read_only = true,
                flag if flag.starts_with("--") => log::warn!("Unknown flag {}", flag),
                path => parsed.snapshot_path = Some(path.into()),
            }
        }
        parsed
    }
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;
    use map_lab::state::MapSnapshot;
    use map_lab::{EditorConfig, MapLabApp};

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    let save_handler = Box::new(|snapshot: MapSnapshot| {
                        log::info!(
                            "Saved {} element(s) and {} path(s)",
                            snapshot.elements.len(),
                            snapshot.paths.len()
                        );
                    });
                    Ok(Box::new(MapLabApp::from_creation_context(
                        cc,
                        None,
                        false,
                        EditorConfig::default(),
                        save_handler,
                    )))
                }),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("Failed to start eframe: {:?}", err);
        }
    });
}
