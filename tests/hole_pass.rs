#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use pierce::error::SetupError;
use pierce::geometry::Segment;
use pierce::host::memory::{MemoryHost, WallData};
use pierce::host::{
    CasterSource, ModelLoader, ModelMutator, RayCaster, RunEnumerator, SymbolLookup,
    TargetLookup, ViewLookup,
};
use pierce::math::{Point3, Vector3};
use pierce::model::{
    Category, ElementId, HostRef, ModelId, PlacementBatch, RawCrossing, Run, RunKind, Target,
};
use pierce::{Config, HolePass, PierceError, Result};

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

const CLEARANCE_FT: f64 = 50.0 / 304.8;

struct Project {
    host: MemoryHost,
    ov: ModelId,
    view: ElementId,
    level: ElementId,
    wall_a: ElementId,
    wall_b: ElementId,
}

/// Architectural model with two parallel walls at x = 5 and x = 12 (0.5 ft
/// thick, 10 ft tall) and an opening family; an empty mechanical model.
fn project() -> Project {
    init_tracing();
    let mut host = MemoryHost::new("Tower_AR");
    let ar = host.active();
    let level = host.add_level(ar, "Level 1", 0.0).unwrap();
    let wall_at = |x: f64| {
        WallData::new(
            level,
            Point3::new(x, -20.0, 0.0),
            Point3::new(x, 20.0, 0.0),
            0.5,
            10.0,
        )
        .unwrap()
    };
    let wall_a = host.add_wall(ar, wall_at(5.0)).unwrap();
    let wall_b = host.add_wall(ar, wall_at(12.0)).unwrap();
    host.add_symbol(ar, Category::GenericModel, "Отверстие", &["Ширина", "Высота"])
        .unwrap();
    host.add_view(ar, "{3D} template", true).unwrap();
    let view = host.add_view(ar, "{3D}", false).unwrap();
    let ov = host.open_model("Tower_ОВ");

    Project {
        host,
        ov,
        view,
        level,
        wall_a,
        wall_b,
    }
}

fn along_x(y: f64, length: f64) -> Segment {
    Segment::new(Point3::new(0.0, y, 3.0), Vector3::x(), length).unwrap()
}

#[test]
fn places_one_hole_per_wall_crossed() {
    let mut p = project();
    p.host
        .add_run(
            p.ov,
            "Round duct",
            RunKind::Duct,
            along_x(0.0, 20.0),
            &[("RBS_CURVE_DIAMETER_PARAM", 0.8)],
        )
        .unwrap();
    p.host
        .add_run(
            p.ov,
            "Rect duct",
            RunKind::Duct,
            along_x(4.0, 8.0),
            &[("RBS_CURVE_WIDTH_PARAM", 1.0), ("RBS_CURVE_HEIGHT_PARAM", 0.5)],
        )
        .unwrap();
    p.host
        .add_run(
            p.ov,
            "Pipe",
            RunKind::Pipe,
            along_x(-4.0, 30.0),
            &[("RBS_PIPE_DIAMETER_PARAM", 0.25)],
        )
        .unwrap();

    let config = Config::default();
    let report = HolePass::new(&config).execute(&mut p.host).unwrap();

    let ducts = report.kind(RunKind::Duct).unwrap();
    assert_eq!((ducts.runs, ducts.crossings, ducts.placed), (2, 3, 3));
    let pipes = report.kind(RunKind::Pipe).unwrap();
    assert_eq!((pipes.runs, pipes.crossings, pipes.placed), (1, 2, 2));
    assert_eq!(report.placed(), 5);

    let model = p.host.model(p.host.active()).unwrap();
    assert_eq!(
        model.history(),
        [
            "adding holes for duct".to_owned(),
            "adding holes for pipe".to_owned()
        ]
    );

    let holes = model.holes();
    assert_eq!(holes.len(), 5);

    // Round duct: walls a and b, holes on the near faces.
    assert_eq!(holes[0].host, p.wall_a);
    assert_eq!(holes[0].level, p.level);
    assert_relative_eq!(holes[0].position.x, 4.75, epsilon = 1e-9);
    assert_relative_eq!(holes[0].position.z, 3.0, epsilon = 1e-9);
    assert_relative_eq!(holes[0].parameters["Ширина"], 0.8 + CLEARANCE_FT, epsilon = 1e-9);
    assert_relative_eq!(holes[0].parameters["Высота"], 0.8 + CLEARANCE_FT, epsilon = 1e-9);
    assert_eq!(holes[1].host, p.wall_b);
    assert_relative_eq!(holes[1].position.x, 11.75, epsilon = 1e-9);

    // Rectangular duct stops at x = 8: wall a only.
    assert_eq!(holes[2].host, p.wall_a);
    assert_relative_eq!(holes[2].position.y, 4.0, epsilon = 1e-9);
    assert_relative_eq!(holes[2].parameters["Ширина"], 1.0 + CLEARANCE_FT, epsilon = 1e-9);
    assert_relative_eq!(holes[2].parameters["Высота"], 0.5 + CLEARANCE_FT, epsilon = 1e-9);

    assert!(holes[3..].iter().all(|h| {
        (h.parameters["Ширина"] - (0.25 + CLEARANCE_FT)).abs() < 1e-9
    }));
}

#[test]
fn run_ending_inside_a_wall_gets_the_near_face() {
    let mut p = project();
    p.host
        .add_run(
            p.ov,
            "Stub",
            RunKind::Pipe,
            along_x(0.0, 5.0),
            &[("RBS_PIPE_DIAMETER_PARAM", 0.1)],
        )
        .unwrap();

    let report = HolePass::new(&Config::default()).execute(&mut p.host).unwrap();
    assert_eq!(report.placed(), 1);

    let hole = &p.host.model(p.host.active()).unwrap().holes()[0];
    assert_relative_eq!(hole.position.x, 4.75, epsilon = 1e-9);
}

#[test]
fn hidden_walls_are_not_pierced() {
    let mut p = project();
    let ar = p.host.active();
    p.host.hide_in_view(ar, p.view, p.wall_a).unwrap();
    p.host
        .add_run(
            p.ov,
            "Pipe",
            RunKind::Pipe,
            along_x(0.0, 20.0),
            &[("RBS_PIPE_DIAMETER_PARAM", 0.1)],
        )
        .unwrap();

    HolePass::new(&Config::default()).execute(&mut p.host).unwrap();

    let holes = p.host.model(ar).unwrap().holes();
    assert_eq!(holes.len(), 1);
    assert_eq!(holes[0].host, p.wall_b);
}

#[test]
fn runs_between_walls_place_nothing() {
    let mut p = project();
    p.host
        .add_run(
            p.ov,
            "Short duct",
            RunKind::Duct,
            Segment::new(Point3::new(6.0, 0.0, 3.0), Vector3::x(), 4.0).unwrap(),
            &[("RBS_CURVE_DIAMETER_PARAM", 0.4)],
        )
        .unwrap();

    let report = HolePass::new(&Config::default()).execute(&mut p.host).unwrap();

    assert_eq!(report.placed(), 0);
    assert!(p.host.model(p.host.active()).unwrap().history().is_empty());
}

#[test]
fn missing_dimension_discards_the_batch() {
    let mut p = project();
    p.host
        .add_run(
            p.ov,
            "Good duct",
            RunKind::Duct,
            along_x(0.0, 20.0),
            &[("RBS_CURVE_DIAMETER_PARAM", 0.4)],
        )
        .unwrap();
    p.host
        .add_run(
            p.ov,
            "Broken duct",
            RunKind::Duct,
            along_x(2.0, 20.0),
            &[("RBS_CURVE_WIDTH_PARAM", 0.4)],
        )
        .unwrap();

    let err = HolePass::new(&Config::default())
        .execute(&mut p.host)
        .unwrap_err();

    match err {
        PierceError::MissingDimension { run } => assert!(run.contains("Broken duct")),
        other => panic!("unexpected error: {other}"),
    }
    let model = p.host.model(p.host.active()).unwrap();
    assert!(model.holes().is_empty());
    assert!(model.history().is_empty());
}

#[test]
fn missing_companion_model_aborts_before_mutation() {
    let mut p = project();
    let config = Config::default().with_source_marker("VK");

    let err = HolePass::new(&config).execute(&mut p.host).unwrap_err();

    assert!(matches!(
        err,
        PierceError::Setup(SetupError::ModelNotFound { ref marker }) if marker == "VK"
    ));
    assert!(err.to_string().contains("VK"));
    assert!(p.host.model(p.host.active()).unwrap().holes().is_empty());
}

#[test]
fn missing_symbol_aborts_before_mutation() {
    let mut p = project();
    p.host
        .add_run(
            p.ov,
            "Pipe",
            RunKind::Pipe,
            along_x(0.0, 20.0),
            &[("RBS_PIPE_DIAMETER_PARAM", 0.1)],
        )
        .unwrap();
    let config = Config::default().with_hole_family("Niche");

    let err = HolePass::new(&config).execute(&mut p.host).unwrap_err();

    assert!(matches!(
        err,
        PierceError::Setup(SetupError::SymbolNotFound { .. })
    ));
    assert!(p.host.model(p.host.active()).unwrap().holes().is_empty());
}

#[test]
fn missing_view_aborts_before_mutation() {
    init_tracing();
    let mut host = MemoryHost::new("AR");
    let ar = host.active();
    host.add_symbol(ar, Category::GenericModel, "Отверстие", &[])
        .unwrap();
    host.add_view(ar, "template", true).unwrap();
    host.open_model("ОВ");

    let err = HolePass::new(&Config::default())
        .execute(&mut host)
        .unwrap_err();

    assert!(matches!(err, PierceError::Setup(SetupError::ViewNotFound)));
    assert_eq!(err.to_string(), "no non-template 3D view found");
}

/// A kernel whose ray primitive always fails; everything else is `MemoryHost`.
struct FaultyKernel(MemoryHost);

struct FailingCaster;

impl RayCaster for FailingCaster {
    fn cast(&self, _origin: &Point3, _direction: &Vector3) -> Result<Vec<RawCrossing>> {
        Err(PierceError::RayCast("kernel fault".into()))
    }
}

impl ModelLoader for FaultyKernel {
    fn companion_model(&self, marker: &str) -> Result<ModelId> {
        self.0.companion_model(marker)
    }
}

impl SymbolLookup for FaultyKernel {
    fn find_symbol(&self, category: Category, family: &str) -> Result<ElementId> {
        self.0.find_symbol(category, family)
    }
}

impl ViewLookup for FaultyKernel {
    fn default_3d_view(&self) -> Result<ElementId> {
        self.0.default_3d_view()
    }
}

impl RunEnumerator for FaultyKernel {
    fn runs(&self, model: ModelId, kind: RunKind) -> Result<Vec<Run>> {
        self.0.runs(model, kind)
    }
}

impl CasterSource for FaultyKernel {
    type Caster<'a> = FailingCaster;

    fn ray_caster(&self, _view: ElementId) -> Result<FailingCaster> {
        Ok(FailingCaster)
    }
}

impl TargetLookup for FaultyKernel {
    fn resolve_host(&self, target: &Target) -> Result<HostRef> {
        self.0.resolve_host(target)
    }
}

impl ModelMutator for FaultyKernel {
    fn apply(&mut self, batch: &PlacementBatch) -> Result<usize> {
        self.0.apply(batch)
    }
}

#[test]
fn ray_cast_failure_aborts_without_mutation() {
    let mut p = project();
    p.host
        .add_run(
            p.ov,
            "Pipe",
            RunKind::Pipe,
            along_x(0.0, 20.0),
            &[("RBS_PIPE_DIAMETER_PARAM", 0.1)],
        )
        .unwrap();
    let mut host = FaultyKernel(p.host);

    let err = HolePass::new(&Config::default())
        .execute(&mut host)
        .unwrap_err();

    assert!(matches!(err, PierceError::RayCast(ref msg) if msg == "kernel fault"));
    let model = host.0.model(host.0.active()).unwrap();
    assert!(model.holes().is_empty());
    assert!(model.history().is_empty());
}
