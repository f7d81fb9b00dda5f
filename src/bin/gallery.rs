//! Demo host for the notebook control: a softbuffer window with a tab
//! strip, a colored content area per page, and keyboard shortcuts to
//! exercise the API.
//!
//! Keys: `n` inserts a page after the selection, `w` closes the selected
//! page, `b` toggles the nav buttons, `f` toggles fixed-height mode,
//! `t` flips the theme, `e` toggles the enabled state.

use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};
use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, OwnedDisplayHandle};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

use folio::render::{FontMeasure, SoftRenderer};
use folio::style::{load_style, save_style};
use folio::{Canvas, Color, ContentId, Icon, Notebook, NotebookObserver, Page, Rect, Theme};

const FONT_PX: f32 = 14.0;

/// Typical regular-weight faces on the platforms the gallery runs on.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// Loads the UI font: `FOLIO_FONT` wins, then the platform candidates.
fn load_font() -> Result<FontMeasure> {
    if let Some(path) = std::env::var_os("FOLIO_FONT") {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("reading FOLIO_FONT {}", path.to_string_lossy()))?;
        return FontMeasure::from_bytes(&bytes, FONT_PX);
    }
    for candidate in FONT_CANDIDATES {
        if let Ok(bytes) = std::fs::read(candidate) {
            if let Ok(font) = FontMeasure::from_bytes(&bytes, FONT_PX) {
                eprintln!("[folio] using font {candidate}");
                return Ok(font);
            }
        }
    }
    Err(anyhow!(
        "no usable font found; set FOLIO_FONT to a .ttf/.otf path"
    ))
}

/// Decodes a PNG into a notebook icon.
fn load_icon(path: &std::path::Path) -> Result<Icon> {
    let decoded = image::open(path)
        .with_context(|| format!("decoding icon {}", path.display()))?
        .to_rgba8();
    Ok(Icon {
        width: decoded.width(),
        height: decoded.height(),
        rgba: decoded.into_raw(),
    })
}

/// Fallback icon: a filled disc in the given color.
fn dot_icon(side: u32, color: Color) -> Icon {
    let mut rgba = vec![0u8; (side * side * 4) as usize];
    let center = side as f32 / 2.0 - 0.5;
    let radius = side as f32 / 2.0 - 1.0;
    for y in 0..side {
        for x in 0..side {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
            let idx = ((y * side + x) * 4) as usize;
            rgba[idx] = color.r;
            rgba[idx + 1] = color.g;
            rgba[idx + 2] = color.b;
            rgba[idx + 3] = (coverage * 255.0) as u8;
        }
    }
    Icon { width: side, height: side, rgba }
}

fn page_icon(seed: u64) -> Icon {
    if let Some(dir) = std::env::var_os("FOLIO_ICON_DIR") {
        let path = std::path::Path::new(&dir).join(format!("page{seed}.png"));
        match load_icon(&path) {
            Ok(icon) => return icon,
            Err(err) => eprintln!("[folio] {err:#}, using builtin icon"),
        }
    }
    dot_icon(12, content_color(ContentId(seed)))
}

/// Deterministic content-area color for a page handle.
fn content_color(content: ContentId) -> Color {
    const SWATCHES: &[u32] = &[0x5B8DEF, 0x5EC16E, 0xC75BEF, 0xEFB65B, 0xEF5B78, 0x5BE0EF];
    Color::from_pixel(SWATCHES[content.0 as usize % SWATCHES.len()])
}

/// Observer that narrates notebook events to stderr.
struct EventLog;

impl NotebookObserver for EventLog {
    fn selection_changed(&mut self, old: Option<usize>, new: Option<usize>) {
        eprintln!("[folio] selection {old:?} -> {new:?}");
    }

    fn page_closing(&mut self, index: usize) -> bool {
        eprintln!("[folio] closing page {index}");
        false
    }

    fn page_closed(&mut self, content: ContentId) {
        eprintln!("[folio] closed content {}", content.0);
    }

    fn page_reordered(&mut self, content: ContentId, from: usize, to: usize) {
        eprintln!("[folio] reordered content {} {from} -> {to}", content.0);
    }
}

struct GalleryWindow {
    window: Arc<Window>,
    surface: Surface<OwnedDisplayHandle, Arc<Window>>,
    renderer: SoftRenderer,
    notebook: Notebook,
    theme: Theme,
    next_content: u64,
}

impl GalleryWindow {
    fn new(
        window: Arc<Window>,
        context: &Context<OwnedDisplayHandle>,
        font: &FontMeasure,
    ) -> Result<GalleryWindow> {
        let surface = Surface::new(context, window.clone())
            .map_err(|err| anyhow!("softbuffer surface: {err}"))?;
        let renderer = SoftRenderer::new(font);

        let mut notebook = Notebook::new(Box::new(font.clone()));
        notebook.set_style(load_style().unwrap_or_default());
        notebook.set_nav_buttons_enabled(true);
        notebook.add_observer(Box::new(EventLog));

        let mut gallery = GalleryWindow {
            window,
            surface,
            renderer,
            notebook,
            theme: Theme::Dark,
            next_content: 0,
        };
        for title in ["Overview", "Documents", "Settings"] {
            gallery.insert_page(title);
        }
        gallery.notebook.on_loaded();
        let size = gallery.window.inner_size();
        gallery
            .notebook
            .on_resized(size.width as f32, size.height as f32);
        Ok(gallery)
    }

    fn insert_page(&mut self, title: &str) {
        let content = ContentId(self.next_content);
        self.next_content += 1;
        let index = self.notebook.selected_index().map(|i| i + 1).unwrap_or(0);
        let page = Page::new(title, content)
            .closable(true)
            .with_icon(page_icon(content.0));
        self.notebook.insert_page(index, page);
    }

    fn on_key(&mut self, key: &Key) {
        match key {
            Key::Character(ch) => match ch.as_str() {
                "n" => {
                    let title = format!("Page {}", self.next_content + 1);
                    self.insert_page(&title);
                }
                "w" => {
                    if let Some(index) = self.notebook.selected_index() {
                        self.notebook.close_page(index);
                    }
                }
                "b" => {
                    let enabled = self.notebook.nav_buttons_enabled();
                    self.notebook.set_nav_buttons_enabled(!enabled);
                }
                "f" => {
                    let fixed = self.notebook.fixed_height();
                    self.notebook.set_fixed_height(!fixed);
                }
                "t" => {
                    self.theme = match self.theme {
                        Theme::Dark => Theme::Light,
                        Theme::Light => Theme::Dark,
                    };
                    self.notebook.set_style(self.theme.resolve());
                    save_style(self.notebook.style());
                }
                "e" => {
                    let enabled = self.notebook.is_enabled();
                    self.notebook.set_enabled(!enabled);
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn redraw(&mut self) {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        if self.surface.resize(width, height).is_err() {
            return;
        }
        let Ok(mut buffer) = self.surface.buffer_mut() else {
            return;
        };

        let strip_h = self.notebook.strip_height();
        {
            let mut canvas =
                self.renderer
                    .canvas(&mut buffer, size.width as usize, size.height as usize);
            self.notebook.paint(&mut canvas);

            // Content area below the strip, colored per the displayed page.
            let body = match self.notebook.displayed_content() {
                Some(content) => content_color(content),
                None => Color { r: 24, g: 26, b: 31 },
            };
            canvas.fill_rect(
                Rect::new(0.0, strip_h, size.width as f32, size.height as f32 - strip_h),
                body,
                255,
            );
        }
        if let Err(err) = buffer.present() {
            eprintln!("[folio] present failed: {err}");
        }
    }

    fn sync_redraw(&mut self) {
        if self.notebook.take_redraw() {
            self.window.request_redraw();
        }
    }
}

struct App {
    context: Option<Context<OwnedDisplayHandle>>,
    gallery: Option<GalleryWindow>,
    font: FontMeasure,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gallery.is_some() {
            return;
        }

        match Context::new(event_loop.owned_display_handle()) {
            Ok(ctx) => self.context = Some(ctx),
            Err(err) => {
                eprintln!("[folio] failed to create rendering context: {err}");
                event_loop.exit();
                return;
            }
        }
        let Some(context) = self.context.as_ref() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title("folio gallery")
            .with_inner_size(LogicalSize::new(720.0, 420.0));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                eprintln!("[folio] failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        match GalleryWindow::new(window, context, &self.font) {
            Ok(mut gallery) => {
                gallery.notebook.set_scale(gallery.window.scale_factor() as f32);
                gallery.window.request_redraw();
                self.gallery = Some(gallery);
            }
            Err(err) => {
                eprintln!("[folio] failed to set up window: {err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gallery) = self.gallery.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(size) => {
                gallery
                    .notebook
                    .on_resized(size.width as f32, size.height as f32);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                gallery.notebook.set_scale(scale_factor as f32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                gallery
                    .notebook
                    .pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                gallery.notebook.pointer_left();
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state {
                ElementState::Pressed => gallery.notebook.pointer_pressed(),
                ElementState::Released => gallery.notebook.pointer_released(),
            },
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    gallery.on_key(&event.logical_key);
                }
            }
            WindowEvent::RedrawRequested => {
                gallery.redraw();
            }
            _ => (),
        }
        gallery.sync_redraw();
    }
}

fn main() {
    let font = match load_font() {
        Ok(font) => font,
        Err(err) => {
            eprintln!("[folio] {err:#}");
            std::process::exit(1);
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(loop_) => loop_,
        Err(err) => {
            eprintln!("[folio] failed to create event loop: {err}");
            return;
        }
    };
    let mut app = App { context: None, gallery: None, font };
    if let Err(err) = event_loop.run_app(&mut app) {
        eprintln!("[folio] application error: {err}");
    }
}
