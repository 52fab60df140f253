//! Mesh loading for the viewer.
//!
//! Files are turned into a [`Model`] made of flat triangle-list [`Shape`]s.
//! Supported formats:
//!
//! | Format | Extensions | Notes |
//! |--------|------------|-------|
//! | OBJ    | `.obj`     | Triangulated on load, materials from the referenced `.mtl` |
//! | STL    | `.stl`     | Binary and ASCII, one shape, face normals |
//!
//! Every shape takes the material of its first face; OBJ files without
//! materials and STL files get [`PhongMaterial::default`]. Vertices without a
//! colour are white and faces without normals get their flat face normal.
//!
//! # Normalisation
//!
//! [`GeometryLoader::normalized`] recentres the whole file on its bounding box
//! centre and rescales it uniformly so the largest axis spans `[-1, 1]`. It runs
//! once at load time and is not part of the interactive transforms.
//!
//! ```no_run
//! use shadelab::GeometryLoader;
//!
//! let bunny = GeometryLoader::from_file("models/bunny5KN.obj")
//!     .normalized()
//!     .build()?;
//! # Ok::<(), shadelab::GeometryError>(())
//! ```

use std::io::{BufRead, Read, Seek};
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::mesh::Vertex3d;
use crate::model::{Model, PhongMaterial, Shape};

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown geometry format: '{0}'")]
    UnknownFormat(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0} contains no triangles")]
    Empty(PathBuf),
}

/// Shapes read from a file before normalisation.
#[derive(Clone, Debug, Default)]
pub struct RawGeometry {
    pub shapes: Vec<Shape>,
}

impl RawGeometry {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.shapes
            .iter()
            .flat_map(|s| s.vertices.iter())
            .map(|v| Vec3::from(v.position))
    }

    /// Axis-aligned bounding box over every shape, as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.positions().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(p), max.max(p)),
        )
    }

    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        let (min, max) = self.bounds();
        max - min
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(|s| s.vertices.is_empty())
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.for_each_position(|p| p + offset);
    }

    pub fn scale(&mut self, factor: f32) {
        self.for_each_position(|p| p * factor);
    }

    /// Recentres on the bounding box centre and fits the largest axis to `[-1, 1]`.
    pub fn normalize(&mut self) {
        let center = self.center();
        self.translate(-center);

        let size = self.size();
        let half_extent = size.max_element() / 2.0;
        if half_extent > 0.0 {
            self.scale(1.0 / half_extent);
        }
    }

    fn for_each_position(&mut self, f: impl Fn(Vec3) -> Vec3) {
        for v in self.shapes.iter_mut().flat_map(|s| s.vertices.iter_mut()) {
            v.position = f(Vec3::from(v.position)).to_array();
        }
    }

    pub fn into_model(self, name: impl Into<String>) -> Model {
        Model::new(name, self.shapes)
    }
}

/// Builder that reads a file and applies load-time fixups.
#[derive(Clone, Debug)]
pub struct GeometryLoader {
    path: PathBuf,
    normalize: bool,
}

impl GeometryLoader {
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            normalize: false,
        }
    }

    /// Recentre and rescale to `[-1, 1]` after loading.
    pub fn normalized(mut self) -> Self {
        self.normalize = true;
        self
    }

    pub fn build(self) -> Result<Model, GeometryError> {
        let mut geometry = load_file(&self.path)?;
        if geometry.is_empty() {
            return Err(GeometryError::Empty(self.path));
        }
        if self.normalize {
            geometry.normalize();
        }

        let name = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model")
            .to_string();
        let model = geometry.into_model(name);
        log::info!(
            "loaded {} ({} shapes, {} vertices)",
            self.path.display(),
            model.shapes.len(),
            model.vertex_count()
        );
        Ok(model)
    }
}

/// Loads and normalises a model, the way the viewer does at startup.
pub fn load_model(path: impl AsRef<Path>) -> Result<Model, GeometryError> {
    GeometryLoader::from_file(path).normalized().build()
}

fn load_file(path: &Path) -> Result<RawGeometry, GeometryError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "obj" => load_obj_file(path),
        "stl" => {
            let file = std::fs::File::open(path)?;
            parse_stl(&mut std::io::BufReader::new(file))
        }
        _ => Err(GeometryError::UnknownFormat(ext)),
    }
}

fn obj_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

fn load_obj_file(path: &Path) -> Result<RawGeometry, GeometryError> {
    if !path.exists() {
        return Err(GeometryError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )));
    }
    let (models, materials) = tobj::load_obj(path, &obj_options())
        .map_err(|e| GeometryError::Parse(format!("{}: {e}", path.display())))?;
    let materials = materials.unwrap_or_else(|e| {
        log::warn!("{}: materials unavailable ({e})", path.display());
        Vec::new()
    });
    Ok(build_obj(&models, &materials))
}

/// Parses OBJ text from a reader. Material libraries are not resolved.
pub fn parse_obj<R: BufRead>(reader: &mut R) -> Result<RawGeometry, GeometryError> {
    let (models, _) = tobj::load_obj_buf(reader, &obj_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| GeometryError::Parse(e.to_string()))?;
    Ok(build_obj(&models, &[]))
}

fn build_obj(models: &[tobj::Model], materials: &[tobj::Material]) -> RawGeometry {
    let shapes = models
        .iter()
        .map(|m| {
            let material = m
                .mesh
                .material_id
                .and_then(|id| materials.get(id))
                .map(phong_from_obj)
                .unwrap_or_default();
            Shape::new(obj_vertices(&m.mesh), material)
        })
        .collect();
    RawGeometry::new(shapes)
}

fn phong_from_obj(m: &tobj::Material) -> PhongMaterial {
    let fallback = PhongMaterial::default();
    PhongMaterial {
        ka: m.ambient.map(Vec3::from).unwrap_or(fallback.ka),
        kd: m.diffuse.map(Vec3::from).unwrap_or(fallback.kd),
        ks: m.specular.map(Vec3::from).unwrap_or(fallback.ks),
        shininess: fallback.shininess,
    }
}

fn obj_vertices(mesh: &tobj::Mesh) -> Vec<Vertex3d> {
    let xyz = |data: &[f32], i: usize| [data[3 * i], data[3 * i + 1], data[3 * i + 2]];
    let has_colors = !mesh.vertex_color.is_empty();
    let has_normals = !mesh.normals.is_empty() && mesh.normal_indices.len() == mesh.indices.len();

    let mut vertices = Vec::with_capacity(mesh.indices.len());
    for (tri, corners) in mesh.indices.chunks_exact(3).enumerate() {
        let positions = [
            xyz(&mesh.positions, corners[0] as usize),
            xyz(&mesh.positions, corners[1] as usize),
            xyz(&mesh.positions, corners[2] as usize),
        ];
        let face_normal = flat_normal(&positions);

        for (k, &index) in corners.iter().enumerate() {
            let i = index as usize;
            let color = if has_colors {
                xyz(&mesh.vertex_color, i)
            } else {
                [1.0; 3]
            };
            let normal = if has_normals {
                xyz(&mesh.normals, mesh.normal_indices[3 * tri + k] as usize)
            } else {
                face_normal
            };
            vertices.push(Vertex3d::new(positions[k], color, normal));
        }
    }
    vertices
}

fn flat_normal(p: &[[f32; 3]; 3]) -> [f32; 3] {
    let (a, b, c) = (Vec3::from(p[0]), Vec3::from(p[1]), Vec3::from(p[2]));
    (b - a).cross(c - a).normalize_or_zero().to_array()
}

/// Parses STL (binary or ASCII) into a single white shape.
pub fn parse_stl<R: Read + Seek>(reader: &mut R) -> Result<RawGeometry, GeometryError> {
    let stl = stl_io::read_stl(reader)
        .map_err(|e| GeometryError::Parse(format!("STL parse error: {}", e)))?;

    let mut vertices = Vec::with_capacity(stl.faces.len() * 3);
    for face in &stl.faces {
        let normal: [f32; 3] = face.normal.into();
        for &vertex_idx in &face.vertices {
            let position: [f32; 3] = stl.vertices[vertex_idx].into();
            vertices.push(Vertex3d::new(position, [1.0; 3], normal));
        }
    }

    Ok(RawGeometry::new(vec![Shape::new(
        vertices,
        PhongMaterial::default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRA: &str = "\
v 0 0 0
v 4 0 0
v 0 2 0
v 0 0 1
f 1 2 3
f 1 2 4
";

    fn geometry_from(points: &[[f32; 3]]) -> RawGeometry {
        let vertices = points
            .iter()
            .map(|p| Vertex3d::new(*p, [1.0; 3], [0.0, 0.0, 1.0]))
            .collect();
        RawGeometry::new(vec![Shape::new(vertices, PhongMaterial::default())])
    }

    #[test]
    fn raw_geometry_bounds() {
        let geom = geometry_from(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-1.0, -1.0, -1.0]]);
        let (min, max) = geom.bounds();
        assert_eq!(min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn normalize_fits_largest_axis_to_unit_range() {
        let mut geom = geometry_from(&[[2.0, 2.0, 2.0], [10.0, 4.0, 3.0], [6.0, 3.0, 2.5]]);
        geom.normalize();
        let (min, max) = geom.bounds();
        assert!((min.x + 1.0).abs() < 1e-5);
        assert!((max.x - 1.0).abs() < 1e-5);
        // Other axes keep their proportions: y spans 2 of 8 units.
        assert!((max.y - min.y - 0.5).abs() < 1e-5);
        assert!(geom.center().length() < 1e-5);
    }

    #[test]
    fn normalize_leaves_single_point_finite() {
        let mut geom = geometry_from(&[[3.0, 3.0, 3.0]]);
        geom.normalize();
        assert_eq!(geom.shapes[0].vertices[0].position, [0.0; 3]);
    }

    #[test]
    fn obj_faces_are_flattened_with_face_normals() {
        let mut reader = std::io::Cursor::new(TETRA.as_bytes());
        let geom = parse_obj(&mut reader).expect("parse obj");
        assert_eq!(geom.shapes.len(), 1);
        let shape = &geom.shapes[0];
        assert_eq!(shape.vertex_count(), 6);
        assert_eq!(shape.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert_eq!(shape.vertices[0].color, [1.0; 3]);
        assert_eq!(shape.material, PhongMaterial::default());
    }

    #[test]
    fn obj_normalization_maps_to_unit_cube() {
        let mut reader = std::io::Cursor::new(TETRA.as_bytes());
        let mut geom = parse_obj(&mut reader).expect("parse obj");
        geom.normalize();
        let (min, max) = geom.bounds();
        assert!((min.x + 1.0).abs() < 1e-5 && (max.x - 1.0).abs() < 1e-5);
        assert!(max.y <= 1.0 && min.z >= -1.0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = GeometryLoader::from_file("scene.fbx").build().unwrap_err();
        assert!(matches!(err, GeometryError::UnknownFormat(ext) if ext == "fbx"));
    }

    #[test]
    fn missing_obj_is_io_error() {
        let err = load_model("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, GeometryError::Io(_)));
    }
}
