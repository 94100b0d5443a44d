use super::*;
use crate::backend::{BackendError, GridBuffer, ImageBuffer};
use crate::config::GridOptions;
use crate::log::{LogLevel, MemoryLogger};
use crate::projection::EARTH_RADIUS;
use parking_lot::Mutex;
use std::f64::consts::PI;
use std::path::PathBuf;
use tempfile::TempDir;

const HALF_WORLD: f64 = PI * EARTH_RADIUS;

#[derive(Default)]
struct Calls {
    boxes: Vec<BoundingBox>,
    buffer_sizes: Vec<u32>,
    saved: Vec<(PathBuf, String)>,
    grid_requests: Vec<(usize, String, Vec<String>)>,
}

struct Recording {
    calls: Arc<Mutex<Calls>>,
    fail_render: bool,
}

impl MapContext for Recording {
    fn load_style(&mut self, _: &Path, _: bool) -> Result<(), BackendError> {
        Ok(())
    }
    fn native_srs(&self) -> String {
        "epsg:3857".into()
    }
    fn zoom_to_box(&mut self, bbox: &BoundingBox) {
        self.calls.lock().boxes.push(*bbox);
    }
    fn set_buffer_size(&mut self, buffer_size: u32) {
        self.calls.lock().buffer_sizes.push(buffer_size);
    }
    fn render_image(&mut self) -> Result<ImageBuffer, BackendError> {
        if self.fail_render {
            return Err(BackendError::Render("style has no layers".into()));
        }
        Ok(ImageBuffer::new(8, 8))
    }
    fn save_image(&self, _: &ImageBuffer, path: &Path, file_type: &str) -> Result<(), BackendError> {
        self.calls
            .lock()
            .saved
            .push((path.to_path_buf(), file_type.to_string()));
        Ok(())
    }
    fn render_interaction_layer(
        &mut self,
        layer: usize,
        key: &str,
        fields: &[String],
    ) -> Result<GridBuffer, BackendError> {
        self.calls
            .lock()
            .grid_requests
            .push((layer, key.to_string(), fields.to_vec()));
        let mut grid = GridBuffer::new(8, 8, key);
        let mut attrs = serde_json::Map::new();
        attrs.insert("name".into(), "Lake".into());
        let id = grid.add_feature("17", attrs);
        grid.fill_rect(0, 0, 4, 8, id);
        Ok(grid)
    }
}

fn view(config: RenderConfig, fail_render: bool) -> (RenderView, Arc<Mutex<Calls>>, Arc<MemoryLogger>) {
    let calls = Arc::new(Mutex::new(Calls::default()));
    let logger = Arc::new(MemoryLogger::new());
    let context = Box::new(Recording {
        calls: Arc::clone(&calls),
        fail_render,
    });
    let view = RenderView::new(
        context,
        MapProjection::web_mercator(),
        Arc::new(ProjectionTable::default()),
        Arc::new(config),
        logger.clone(),
    );
    (view, calls, logger)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_tile_corners() {
    let table = ProjectionTable::default();
    let job = crate::job::TileJob {
        filename: "t.png".into(),
        tile_x: 2,
        tile_y: 5,
        zoom: 4,
    };
    let corners = job.corners(&table, 256, 256).unwrap();
    assert_eq!(corners.bottom_left, PixelPoint::new(512.0, 1536.0));
    assert_eq!(corners.top_right, PixelPoint::new(768.0, 1280.0));
}

#[test]
fn test_tile_corners_reject_unsupported_zoom() {
    let table = ProjectionTable::default();
    let job = crate::job::TileJob {
        filename: "t.png".into(),
        tile_x: 0,
        tile_y: 0,
        zoom: 19,
    };
    assert_eq!(
        job.corners(&table, 256, 256),
        Err(CoordError::UnsupportedZoom { zoom: 19, max: 18 })
    );
}

#[test]
fn test_frame_corners_are_centred() {
    let table = ProjectionTable::default();
    let job = crate::job::FrameJob {
        filename: "f.png".into(),
        latitude: 0.0,
        longitude: 0.0,
        zoom: 2,
    };
    let corners = job.corners(&table, 400, 200).unwrap();
    // World is 1024 px at zoom 2, centre at (512, 512).
    assert_eq!(corners.bottom_left, PixelPoint::new(312.0, 612.0));
    assert_eq!(corners.top_right, PixelPoint::new(712.0, 412.0));
}

#[test]
fn test_tile_0_0_1_bbox_is_north_west_quadrant() {
    let (view, _, _) = view(RenderConfig::new("s.xml"), false);
    let job = crate::job::TileJob {
        filename: "0/0/1.png".into(),
        tile_x: 0,
        tile_y: 0,
        zoom: 1,
    };
    let bbox = view.bounding_box(&job).unwrap();

    assert_close(bbox.xmin(), -HALF_WORLD);
    assert_close(bbox.xmax(), 0.0);
    assert_close(bbox.ymin(), 0.0);
    assert_close(bbox.ymax(), HALF_WORLD);
    assert!(bbox.xmin() <= bbox.xmax());
    assert!(bbox.ymin() <= bbox.ymax());
}

#[test]
fn test_frame_bbox_is_centred_on_point() {
    let (view, _, _) = view(RenderConfig::new("s.xml").with_size(300, 200), false);
    let job = crate::job::FrameJob {
        filename: "frame.png".into(),
        latitude: 0.0,
        longitude: 0.0,
        zoom: 3,
    };
    let bbox = view.bounding_box(&job).unwrap();
    let center = bbox.center();
    assert_close(center.x, 0.0);
    assert_close(center.y, 0.0);
    assert!(bbox.width() > bbox.height());
}

#[test]
fn test_render_tile_drives_context() {
    let config = RenderConfig::new("s.xml")
        .with_size(256, 256)
        .with_buffer_size(32)
        .with_file_type("png256");
    let (mut view, calls, _) = view(config, false);

    view.render(&RenderJob::tile("/out/1/0/0.png", 0, 0, 1)).unwrap();

    let calls = calls.lock();
    assert_eq!(calls.boxes.len(), 1);
    assert_eq!(calls.buffer_sizes, vec![32]);
    assert_eq!(
        calls.saved,
        vec![(PathBuf::from("/out/1/0/0.png"), "png256".to_string())]
    );
    assert!(calls.grid_requests.is_empty());
}

#[test]
fn test_render_failure_names_file() {
    let (mut view, calls, _) = view(RenderConfig::new("s.xml"), true);

    let err = view.render(&RenderJob::tile("/out/2/1/1.png", 1, 1, 2)).unwrap_err();
    assert!(matches!(err, RenderError::RenderFailure { ref filename, .. } if filename == "/out/2/1/1.png"));
    assert!(err.to_string().contains("style has no layers"));
    assert!(calls.lock().saved.is_empty());
}

#[test]
fn test_unsupported_zoom_error() {
    let (mut view, calls, _) = view(RenderConfig::new("s.xml"), false);

    let err = view.render(&RenderJob::tile("deep.png", 0, 0, 25)).unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedZoom { zoom: 25, max: 18, .. }));
    assert!(calls.lock().boxes.is_empty());
}

#[test]
fn test_tile_grid_companion() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("3.png");
    let config = RenderConfig::new("s.xml")
        .with_size(8, 8)
        .with_grid(GridOptions::new().with_fields(["name"]));
    let (mut view, calls, logger) = view(config, false);

    view.render(&RenderJob::tile(&image, 0, 0, 0)).unwrap();

    let grid_path = temp.path().join("3.grid.json");
    let content = std::fs::read_to_string(&grid_path).unwrap();
    assert!(content.starts_with("grid("));
    assert!(content.ends_with(')'));
    let json: serde_json::Value =
        serde_json::from_str(&content["grid(".len()..content.len() - 1]).unwrap();
    assert_eq!(json["keys"], serde_json::json!(["17", ""]));
    assert_eq!(json["data"]["17"]["name"], "Lake");

    let calls = calls.lock();
    assert_eq!(
        calls.grid_requests,
        vec![(GRID_LAYER, "__id__".to_string(), vec!["name".to_string()])]
    );
    assert!(logger.contains(&format!("Rendering {}", grid_path.display())));
    assert_eq!(logger.messages_at(LogLevel::Info).len(), 1);
}

#[test]
fn test_frames_never_write_grids() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("frame.png");
    let config = RenderConfig::new("s.xml").with_grid(GridOptions::new());
    let (mut view, calls, _) = view(config, false);

    view.render(&RenderJob::frame(&image, 51.5, -0.12, 10)).unwrap();

    assert!(calls.lock().grid_requests.is_empty());
    assert!(!temp.path().join("frame.grid.json").exists());
}

#[test]
fn test_quiet_view_logs_grid_at_debug() {
    let temp = TempDir::new().unwrap();
    let config = RenderConfig::new("s.xml")
        .with_size(8, 8)
        .with_grid(GridOptions::new());
    let (view, _, logger) = view(config, false);
    let mut view = view.with_quiet(true);

    view.render(&RenderJob::tile(temp.path().join("q.png"), 0, 0, 0))
        .unwrap();

    assert!(logger.messages_at(LogLevel::Info).is_empty());
    assert_eq!(logger.messages_at(LogLevel::Debug).len(), 1);
}
