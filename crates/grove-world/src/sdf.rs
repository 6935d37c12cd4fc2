//! SDF 1.7 world rendering.
//!
//! The document holds a fixed environment (sun, two lights, the ground model,
//! ODE physics) followed by one `<include>` per scene entry. Numbers are
//! printed with Rust's shortest round-trip formatting so no precision is lost.

use std::path::{Path, PathBuf};

use grove_scatter::{Scene, SceneEntry};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::WorldError;

/// Extension of written world files.
pub const WORLD_FILE_EXTENSION: &str = "world";

const SDF_VERSION: &str = "1.7";

/// Renders scenes into simulator world documents.
#[derive(Clone, Debug)]
pub struct WorldWriter {
    world_name: String,
}

impl Default for WorldWriter {
    fn default() -> Self {
        Self::new("forest_world")
    }
}

impl WorldWriter {
    pub fn new(world_name: impl Into<String>) -> Self {
        Self {
            world_name: world_name.into(),
        }
    }

    pub fn world_name(&self) -> &str {
        &self.world_name
    }

    /// Render the full world document.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Xml`] if the XML writer rejects an event.
    pub fn render(&self, scene: &Scene) -> Result<String, WorldError> {
        let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
        w.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        w.write_event(Event::Start(
            BytesStart::new("sdf").with_attributes([("version", SDF_VERSION)]),
        ))?;
        w.write_event(Event::Start(
            BytesStart::new("world").with_attributes([("name", self.world_name.as_str())]),
        ))?;

        write_lighting(&mut w)?;
        write_ground(&mut w)?;
        write_physics(&mut w)?;
        for entry in &scene.entries {
            write_entry(&mut w, entry)?;
        }

        w.write_event(Event::End(BytesEnd::new("world")))?;
        w.write_event(Event::End(BytesEnd::new("sdf")))?;

        let mut xml = String::from_utf8_lossy(&w.into_inner()).into_owned();
        xml.push('\n');
        Ok(xml)
    }

    /// Render and write `<worlds_dir>/<world_name>.world`, creating the
    /// directory if needed. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if rendering or writing fails.
    pub fn write(&self, scene: &Scene, worlds_dir: &Path) -> Result<PathBuf, WorldError> {
        let xml = self.render(scene)?;
        std::fs::create_dir_all(worlds_dir)?;
        let path = worlds_dir.join(format!("{}.{WORLD_FILE_EXTENSION}", self.world_name));
        std::fs::write(&path, xml)?;
        tracing::info!(path = %path.display(), entries = scene.entries.len(), "World file written");
        Ok(path)
    }
}

type XmlWriter = Writer<Vec<u8>>;

fn start(w: &mut XmlWriter, name: &str) -> Result<(), WorldError> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end(w: &mut XmlWriter, name: &str) -> Result<(), WorldError> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// `<name>text</name>`
fn text_element(w: &mut XmlWriter, name: &str, text: &str) -> Result<(), WorldError> {
    start(w, name)?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    end(w, name)
}

fn write_lighting(w: &mut XmlWriter) -> Result<(), WorldError> {
    start(w, "include")?;
    text_element(w, "uri", "model://sun")?;
    end(w, "include")?;

    // Shadows stay off on both lights; hundreds of grass patches make them costly.
    w.write_event(Event::Start(
        BytesStart::new("light").with_attributes([("name", "ambient"), ("type", "directional")]),
    ))?;
    text_element(w, "cast_shadows", "false")?;
    text_element(w, "pose", "0 0 10 0 0 0")?;
    text_element(w, "diffuse", "0.8 0.8 0.8 1")?;
    text_element(w, "specular", "0.1 0.1 0.1 1")?;
    text_element(w, "direction", "0.1 0.1 -0.9")?;
    end(w, "light")?;

    w.write_event(Event::Start(
        BytesStart::new("light").with_attributes([("name", "point_light"), ("type", "point")]),
    ))?;
    text_element(w, "cast_shadows", "false")?;
    text_element(w, "pose", "0 0 10 0 0 0")?;
    text_element(w, "diffuse", "0.3 0.3 0.3 1")?;
    text_element(w, "specular", "0.05 0.05 0.05 1")?;
    w.write_event(Event::Empty(BytesStart::new("attenuation")))?;
    text_element(w, "range", "30")?;
    end(w, "light")
}

fn write_ground(w: &mut XmlWriter) -> Result<(), WorldError> {
    start(w, "include")?;
    text_element(w, "uri", "model://ground")?;
    text_element(w, "name", "terrain")?;
    text_element(w, "pose", "0 0 0 0 0 0")?;
    end(w, "include")
}

fn write_physics(w: &mut XmlWriter) -> Result<(), WorldError> {
    w.write_event(Event::Start(
        BytesStart::new("physics").with_attributes([("type", "ode")]),
    ))?;
    text_element(w, "real_time_update_rate", "1000.0")?;
    text_element(w, "max_step_size", "0.001")?;
    text_element(w, "real_time_factor", "1")?;
    text_element(w, "gravity", "0 0 -9.8")?;
    end(w, "physics")
}

fn write_entry(w: &mut XmlWriter, entry: &SceneEntry) -> Result<(), WorldError> {
    let p = entry.position;
    let r = entry.rotation;
    let s = entry.scale;
    start(w, "include")?;
    text_element(w, "uri", &format!("model://{}/{}", entry.category, entry.variant))?;
    text_element(w, "name", &format!("{}_{}", entry.category, entry.index))?;
    text_element(
        w,
        "pose",
        &format!("{} {} {} {} {} {}", p.x, p.y, p.z, r.roll, r.pitch, r.yaw),
    )?;
    text_element(w, "scale", &format!("{s} {s} {s}"))?;
    end(w, "include")
}
