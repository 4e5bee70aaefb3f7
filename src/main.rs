use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use grid_raycaster::assets::load_wall_tiles;
use grid_raycaster::config::{Config, default_scene};
use grid_raycaster::error::EngineError;
use grid_raycaster::game::Game;
use grid_raycaster::input::Action;
use grid_raycaster::persist::{FileStore, load_player};
use grid_raycaster::renderer::fit_canvas_width;
use grid_raycaster::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use grid_raycaster::surface::{Canvas, Surface as _};

#[derive(Debug, Parser)]
#[command(version, about = "Grid ray-casting engine", long_about = None)]
struct Cli {
    /// Where the player state is saved
    #[arg(long = "state", value_name = "PATH")]
    state: Option<PathBuf>,

    /// Directory holding wall textures
    #[arg(long = "assets", value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Ignore any saved player state
    #[arg(long = "fresh")]
    fresh: bool,
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    game: Game,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal low resolution canvas
    canvas: Canvas,
    scale_lut: ScaleLut,

    last_tick: Instant,
    error: Option<EngineError>,
}

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Action::MoveForward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Action::MoveBackward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Action::TurnLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Action::TurnRight),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        match self.create_surface(event_loop) {
            Ok(()) => {
                self.last_tick = Instant::now();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = action_for(code) {
                    self.game
                        .input
                        .set(action, state == ElementState::Pressed);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw(id) {
                    self.fail(event_loop, e);
                }
            }

            WindowEvent::Resized(new_size) => {
                let (dw, dh) = (new_size.width as usize, new_size.height as usize);
                self.rebuild_canvas_and_lut(dw, dh);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    fn new(game: Game) -> Self {
        Self {
            window: None,
            surface: None,
            game,
            frame_counter: 0,
            last_fps_print: Instant::now(),
            canvas: Canvas::new(0, 0),
            scale_lut: ScaleLut::empty(),
            last_tick: Instant::now(),
            error: None,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let config = &self.game.config;
        let attributes = Window::default_attributes()
            .with_title("Grid Raycaster")
            .with_inner_size(LogicalSize::new(config.window_width, config.window_height));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| EngineError::SurfaceUnavailable(e.to_string()))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| EngineError::SurfaceUnavailable(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| EngineError::SurfaceUnavailable(e.to_string()))?;

        let size = window.inner_size();
        self.rebuild_canvas_and_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: EngineError) {
        log::error!("{e}");
        self.error = Some(e);
        event_loop.exit();
    }

    /// One frame: update, render, present.
    fn redraw(&mut self, id: WindowId) -> Result<(), EngineError> {
        self.tick();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(()); // Minimized window, skip drawing
        };
        let dw = size.width as usize;

        surface
            .resize(w, h)
            .map_err(|e| EngineError::Present(e.to_string()))?;

        self.canvas.clear(self.game.config.floor_color);
        self.game.render(&mut self.canvas);

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| EngineError::Present(e.to_string()))?;
        blit_nearest_stretch(
            &mut buf,
            dw,
            self.canvas.pixels(),
            self.canvas.width(),
            &self.scale_lut,
        );
        buf.present()
            .map_err(|e| EngineError::Present(e.to_string()))?;

        // Print FPS
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::info!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
        Ok(())
    }

    fn tick(&mut self) {
        // Compute dt with cap to avoid huge jumps if the app was paused
        let now = Instant::now();
        let mut dt = now.duration_since(self.last_tick);
        self.last_tick = now;
        if dt > Duration::from_millis(100) {
            dt = Duration::from_millis(100);
        }
        self.game.tick(dt.as_secs_f64());
    }

    fn rebuild_canvas_and_lut(&mut self, dst_w: usize, dst_h: usize) {
        // Keep internal height fixed (controls pixel size look)
        let target_h = self.game.config.render_height;
        let aspect = if dst_h > 0 {
            dst_w as f64 / dst_h as f64
        } else {
            1.0
        };

        // Derive width from aspect, in whole strips so none are clipped
        let target_w = fit_canvas_width((target_h as f64 * aspect).round() as usize);

        self.canvas.resize(target_w, target_h);
        self.scale_lut = build_scale_lut(dst_w, dst_h, target_w, target_h);
    }
}

fn main() -> Result<(), EngineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::default();
    if let Some(state) = cli.state {
        config.save_path = state;
    }
    if let Some(assets) = cli.assets {
        config.asset_dir = assets;
    }

    // Assets resolve (or fall back) before the first tick
    let textures = pollster::block_on(load_wall_tiles(&config.asset_dir, &config.wall_textures));
    let scene = default_scene(&textures);
    log::info!("Scene loaded: {}x{}", scene.width(), scene.height());

    let store = FileStore::new(config.save_path.clone());
    let default_player = Game::default_player(&scene);
    let player = if cli.fresh {
        default_player
    } else {
        load_player(&store, default_player)
    };
    log::info!("Player at {} facing {:.2}", player.position, player.direction);

    let game = Game::new(scene, player, config, Box::new(store));

    let event_loop = EventLoop::new()?;
    // Redraws are requested every frame, the loop itself only waits for events
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(game);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
