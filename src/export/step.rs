//! ISO 10303-21 (STEP AP214) writer for compounds of orthogonal solids.

use std::collections::HashMap;
use std::fmt::Write;

use crate::bridge::Compound;
use crate::error::{ExportError, Result, TopologyError};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::operations::query::ExtractBoundary;
use crate::topology::{EdgeId, Solid, TopologyStore, VertexId};

const SCHEMA: &str = "AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }";

/// Renders `compound` as a STEP file, one `MANIFOLD_SOLID_BREP` per member.
///
/// # Errors
///
/// Returns [`ExportError::Format`] for an empty compound, a member without
/// a closed boundary, or non-finite coordinates.
pub fn render_step(compound: &Compound) -> Result<String> {
    if compound.is_empty() {
        return Err(ExportError::Format("compound has no members".into()).into());
    }

    let mut writer = StepWriter::default();
    let context = writer.add_context();
    let mut items = vec![writer.add_axis(&Point3::origin(), &Vector3::z(), &Vector3::x())?];
    for member in compound.members() {
        items.push(writer.add_solid(&member.label, &member.solid)?);
    }
    let representation = writer.add(format!(
        "ADVANCED_BREP_SHAPE_REPRESENTATION('bridge',({}),#{context})",
        refs(&items)
    ));
    writer.add_product("bridge", representation);
    writer.finish()
}

/// Accumulates numbered DATA entities.
#[derive(Default)]
struct StepWriter {
    entities: Vec<String>,
}

impl StepWriter {
    fn add(&mut self, entity: String) -> usize {
        self.entities.push(entity);
        self.entities.len()
    }

    fn add_point(&mut self, point: &Point3) -> Result<usize> {
        Ok(self.add(format!("CARTESIAN_POINT('',{})", coords(point.coords.as_slice())?)))
    }

    fn add_direction(&mut self, direction: &Vector3) -> Result<usize> {
        Ok(self.add(format!("DIRECTION('',{})", coords(direction.as_slice())?)))
    }

    fn add_axis(&mut self, origin: &Point3, axis: &Vector3, ref_direction: &Vector3) -> Result<usize> {
        let origin = self.add_point(origin)?;
        let axis = self.add_direction(axis)?;
        let ref_direction = self.add_direction(ref_direction)?;
        Ok(self.add(format!(
            "AXIS2_PLACEMENT_3D('',#{origin},#{axis},#{ref_direction})"
        )))
    }

    /// Millimetre geometric context.
    fn add_context(&mut self) -> usize {
        let length = self.add("(LENGTH_UNIT() NAMED_UNIT(*) SI_UNIT(.MILLI.,.METRE.))".into());
        let angle = self.add("(NAMED_UNIT(*) PLANE_ANGLE_UNIT() SI_UNIT($,.RADIAN.))".into());
        let solid_angle =
            self.add("(NAMED_UNIT(*) SI_UNIT($,.STERADIAN.) SOLID_ANGLE_UNIT())".into());
        let uncertainty = self.add(format!(
            "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-06),#{length},'distance_accuracy_value','confusion accuracy')"
        ));
        self.add(format!(
            "(GEOMETRIC_REPRESENTATION_CONTEXT(3) GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#{uncertainty})) GLOBAL_UNIT_ASSIGNED_CONTEXT((#{length},#{angle},#{solid_angle})) REPRESENTATION_CONTEXT('','3D'))"
        ))
    }

    fn add_product(&mut self, name: &str, representation: usize) {
        let name = escape(name);
        let app = self.add("APPLICATION_CONTEXT('core data for automotive mechanical design processes')".into());
        self.add(format!(
            "APPLICATION_PROTOCOL_DEFINITION('international standard','automotive_design',2000,#{app})"
        ));
        let product_context = self.add(format!("PRODUCT_CONTEXT('',#{app},'mechanical')"));
        let product = self.add(format!(
            "PRODUCT('{name}','{name}','',(#{product_context}))"
        ));
        let formation = self.add(format!("PRODUCT_DEFINITION_FORMATION('','',#{product})"));
        let definition_context =
            self.add(format!("PRODUCT_DEFINITION_CONTEXT('part definition',#{app},'design')"));
        let definition = self.add(format!(
            "PRODUCT_DEFINITION('design','',#{formation},#{definition_context})"
        ));
        let shape = self.add(format!("PRODUCT_DEFINITION_SHAPE('','',#{definition})"));
        self.add(format!(
            "SHAPE_DEFINITION_REPRESENTATION(#{shape},#{representation})"
        ));
    }

    /// Writes the boundary of one solid and returns its `MANIFOLD_SOLID_BREP`.
    fn add_solid(&mut self, name: &str, solid: &Solid) -> Result<usize> {
        let mut store = TopologyStore::new();
        let shell_id = ExtractBoundary::new(solid).execute(&mut store);
        let shell = store.shell(shell_id)?;
        if !shell.is_closed {
            return Err(ExportError::Format(format!("{name} has an open boundary")).into());
        }

        let mut vertex_refs: HashMap<VertexId, (usize, usize)> = HashMap::new();
        for (id, vertex) in store.vertices() {
            let point = self.add_point(&vertex.point)?;
            let vertex_point = self.add(format!("VERTEX_POINT('',#{point})"));
            vertex_refs.insert(id, (point, vertex_point));
        }

        let mut edge_refs: HashMap<EdgeId, usize> = HashMap::new();
        let mut faces = Vec::with_capacity(shell.faces.len());
        for &face_id in &shell.faces {
            let face = store.face(face_id)?;

            let mut oriented = Vec::with_capacity(face.edges.len());
            for oriented_edge in &face.edges {
                let curve = match edge_refs.get(&oriented_edge.edge) {
                    Some(&curve) => curve,
                    None => {
                        let curve = self.add_edge_curve(&store, oriented_edge.edge, &vertex_refs)?;
                        edge_refs.insert(oriented_edge.edge, curve);
                        curve
                    }
                };
                oriented.push(self.add(format!(
                    "ORIENTED_EDGE('',*,*,#{curve},{})",
                    flag(oriented_edge.forward)
                )));
            }
            let edge_loop = self.add(format!("EDGE_LOOP('',({}))", refs(&oriented)));
            let bound = self.add(format!("FACE_OUTER_BOUND('',#{edge_loop},.T.)"));

            let points = store.face_points(face_id)?;
            let [first, second, ..] = points.as_slice() else {
                return Err(ExportError::Format(format!("{name} has a degenerate face")).into());
            };
            let ref_direction = (second - first).normalize();
            let axis = self.add_axis(first, &face.normal, &ref_direction)?;
            let plane = self.add(format!("PLANE('',#{axis})"));
            faces.push(self.add(format!("ADVANCED_FACE('',(#{bound}),#{plane},.T.)")));
        }

        let closed_shell = self.add(format!("CLOSED_SHELL('',({}))", refs(&faces)));
        Ok(self.add(format!(
            "MANIFOLD_SOLID_BREP('{}',#{closed_shell})",
            escape(name)
        )))
    }

    fn add_edge_curve(
        &mut self,
        store: &TopologyStore,
        edge_id: EdgeId,
        vertex_refs: &HashMap<VertexId, (usize, usize)>,
    ) -> Result<usize> {
        let edge = store.edge(edge_id)?;
        let lookup = |id: VertexId| {
            vertex_refs
                .get(&id)
                .copied()
                .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
        };
        let (start_point, start_vertex) = lookup(edge.start)?;
        let (_, end_vertex) = lookup(edge.end)?;

        let span = store.vertex(edge.end)?.point - store.vertex(edge.start)?.point;
        let length = span.norm();
        if length <= TOLERANCE {
            return Err(ExportError::Format("zero-length boundary edge".into()).into());
        }

        let direction = self.add_direction(&(span / length))?;
        let vector = self.add(format!("VECTOR('',#{direction},{})", real(length)?));
        let line = self.add(format!("LINE('',#{start_point},#{vector})"));
        Ok(self.add(format!(
            "EDGE_CURVE('',#{start_vertex},#{end_vertex},#{line},.T.)"
        )))
    }

    fn finish(self) -> Result<String> {
        let mut out = String::new();
        self.write_file(&mut out)
            .map_err(|e| ExportError::Format(e.to_string()))?;
        Ok(out)
    }

    fn write_file(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "ISO-10303-21;")?;
        writeln!(out, "HEADER;")?;
        writeln!(out, "FILE_DESCRIPTION(('steelspan bridge model'),'2;1');")?;
        writeln!(out, "FILE_NAME('bridge','',(''),(''),'steelspan','steelspan','');")?;
        writeln!(out, "FILE_SCHEMA(('{SCHEMA}'));")?;
        writeln!(out, "ENDSEC;")?;
        writeln!(out, "DATA;")?;
        for (index, entity) in self.entities.iter().enumerate() {
            writeln!(out, "#{}={entity};", index + 1)?;
        }
        writeln!(out, "ENDSEC;")?;
        writeln!(out, "END-ISO-10303-21;")
    }
}

fn real(value: f64) -> Result<String> {
    if value.is_finite() {
        Ok(format!("{value:.6}"))
    } else {
        Err(ExportError::Format(format!("non-finite coordinate {value}")).into())
    }
}

fn coords(values: &[f64]) -> Result<String> {
    let parts = values.iter().map(|&v| real(v)).collect::<Result<Vec<_>>>()?;
    Ok(format!("({})", parts.join(",")))
}

fn refs(ids: &[usize]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn flag(value: bool) -> &'static str {
    if value {
        ".T."
    } else {
        ".F."
    }
}

/// Quotes are doubled inside STEP strings.
fn escape(text: &str) -> String {
    text.replace('\'', "''")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::bridge::{BridgeAssembly, BridgeParams, ComponentCategory};
    use crate::error::SteelspanError;
    use crate::operations::creation::{MakeBox, MakeISection};

    fn count(text: &str, entity: &str) -> usize {
        text.lines()
            .filter(|l| l.split_once('=').is_some_and(|(_, e)| e.starts_with(entity)))
            .count()
    }

    #[test]
    fn single_box() {
        let mut compound = Compound::new();
        compound.push(
            "block",
            ComponentCategory::Deck,
            MakeBox::new(2.0, 3.0, 4.0).execute().unwrap(),
        );
        let text = render_step(&compound).unwrap();

        assert!(text.starts_with("ISO-10303-21;"));
        assert!(text.trim_end().ends_with("END-ISO-10303-21;"));
        assert!(text.contains("AUTOMOTIVE_DESIGN"));
        assert_eq!(count(&text, "MANIFOLD_SOLID_BREP"), 1);
        assert_eq!(count(&text, "ADVANCED_FACE"), 6);
        assert_eq!(count(&text, "VERTEX_POINT"), 8);
        assert_eq!(count(&text, "EDGE_CURVE"), 12);
        assert_eq!(count(&text, "ORIENTED_EDGE"), 24);
        assert!(text.contains("MANIFOLD_SOLID_BREP('block'"));
    }

    #[test]
    fn every_reference_is_defined() {
        let mut compound = Compound::new();
        compound.push(
            "girder 1",
            ComponentCategory::Girder,
            MakeISection::new(900.0, 300.0, 16.0, 10.0, 5000.0)
                .execute()
                .unwrap(),
        );
        let text = render_step(&compound).unwrap();

        let defined: HashSet<usize> = text
            .lines()
            .filter_map(|l| l.strip_prefix('#')?.split_once('=')?.0.parse().ok())
            .collect();
        for line in text.lines().filter(|l| l.starts_with('#')) {
            let (_, body) = line.split_once('=').unwrap();
            for reference in body.split('#').skip(1) {
                let digits: String = reference.chars().take_while(char::is_ascii_digit).collect();
                let id: usize = digits.parse().unwrap();
                assert!(defined.contains(&id), "undefined #{id} in {line}");
            }
        }
    }

    #[test]
    fn bridge_has_one_brep_per_member() {
        let mut assembly = BridgeAssembly::new(BridgeParams::default());
        let compound = assembly.build().unwrap();
        let text = render_step(compound).unwrap();
        assert_eq!(count(&text, "MANIFOLD_SOLID_BREP"), 6);
        assert_eq!(count(&text, "ADVANCED_BREP_SHAPE_REPRESENTATION"), 1);
        assert!(text.contains("'parapet (left)'"));
    }

    #[test]
    fn empty_compound_is_a_format_error() {
        assert!(matches!(
            render_step(&Compound::new()),
            Err(SteelspanError::Export(ExportError::Format(_)))
        ));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(escape("o'brien"), "o''brien");
    }
}
