//! Inventory settings file
//!
//! The settings XML carries two ordered lists: CPU → base memory templates
//! and environment name → server name pattern pairs. Elements are collected
//! wherever they appear in the document, so both of these are accepted:
//!
//! ```xml
//! <settings>
//!   <templates>
//!     <template><cpu>2</cpu><memory>4</memory></template>
//!   </templates>
//!   <environments>
//!     <environment name="production">-P[0-9]+$</environment>
//!   </environments>
//! </settings>
//! ```

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{InventoryError, IoResultExt, Result};

/// Settings file used when the configured one does not exist
pub const DEFAULT_SETTINGS_PATH: &str = "lib_settings.xml";

/// Base memory (in GB) for a given number of CPUs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Number of virtual CPUs
    pub cpu_count: u32,
    /// Base memory in GB
    pub memory_gb: u32,
}

/// An environment name and the pattern that selects its servers
#[derive(Debug, Clone)]
pub struct EnvironmentRule {
    /// Environment name, e.g. `production`
    pub name: String,
    /// Pattern searched for in server names
    pub pattern: Regex,
}

impl EnvironmentRule {
    /// Compile a rule, rejecting invalid patterns
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| InventoryError::InvalidPattern {
            environment: name.clone(),
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { name, pattern })
    }
}

/// Templates and environment rules, in document order
#[derive(Debug, Clone, Default)]
pub struct InventorySettings {
    path: Option<PathBuf>,
    templates: Vec<Template>,
    environments: Vec<EnvironmentRule>,
}

#[derive(Clone, Copy)]
enum TemplateField {
    Cpu,
    Memory,
}

#[derive(Default)]
struct PendingTemplate {
    cpu: Option<String>,
    memory: Option<String>,
    field: Option<TemplateField>,
}

impl PendingTemplate {
    fn open(&mut self, field: TemplateField) {
        let slot = match field {
            TemplateField::Cpu => &mut self.cpu,
            TemplateField::Memory => &mut self.memory,
        };
        // Only the first <cpu>/<memory> child counts.
        if slot.is_none() {
            *slot = Some(String::new());
            self.field = Some(field);
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.field {
            Some(TemplateField::Cpu) => self.cpu.get_or_insert_with(String::new).push_str(text),
            Some(TemplateField::Memory) => self.memory.get_or_insert_with(String::new).push_str(text),
            None => {}
        }
    }

    fn finish(self, index: usize) -> Result<Template> {
        Ok(Template {
            cpu_count: parse_number(self.cpu, "cpu", index)?,
            memory_gb: parse_number(self.memory, "memory", index)?,
        })
    }
}

struct PendingEnvironment {
    name: String,
    text: String,
}

fn parse_number(value: Option<String>, element: &str, index: usize) -> Result<u32> {
    let value = value.ok_or_else(|| {
        InventoryError::settings(format!("template #{} has no <{}> element", index + 1, element))
    })?;
    value.trim().parse().map_err(|_| {
        InventoryError::settings(format!(
            "template #{}: <{}> value '{}' is not a whole number",
            index + 1,
            element,
            value.trim()
        ))
    })
}

fn name_attribute(element: &BytesStart) -> Result<String> {
    let attribute = element
        .try_get_attribute("name")
        .map_err(|e| InventoryError::settings(format!("invalid attribute on <environment>: {}", e)))?;
    match attribute {
        Some(attribute) => attribute
            .unescape_value()
            .map(|value| value.into_owned())
            .map_err(|e| InventoryError::settings(format!("invalid environment name: {}", e))),
        None => Ok(String::new()),
    }
}

impl InventorySettings {
    /// Pick the settings file: `path` when it exists, the default otherwise
    pub fn resolve_path(path: &Path) -> PathBuf {
        if path.exists() {
            path.to_path_buf()
        } else {
            warn!(
                "Settings file {:?} not found, falling back to {}",
                path, DEFAULT_SETTINGS_PATH
            );
            PathBuf::from(DEFAULT_SETTINGS_PATH)
        }
    }

    /// Read and parse the settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = Self::resolve_path(path.as_ref());
        let xml = std::fs::read_to_string(&path).with_path(&path)?;

        let mut settings = Self::from_xml_str(&xml)
            .map_err(|e| e.with_context(format!("Reading settings {:?}", path)))?;
        debug!(
            "Loaded {} template(s) and {} environment rule(s) from {:?}",
            settings.templates.len(),
            settings.environments.len(),
            path
        );
        settings.path = Some(path);
        Ok(settings)
    }

    /// Parse settings from an XML document
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut settings = Self::default();
        let mut template: Option<PendingTemplate> = None;
        let mut environment: Option<PendingEnvironment> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                InventoryError::settings(format!(
                    "malformed XML at byte {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Start(element) => match element.local_name().as_ref() {
                    b"template" => template = Some(PendingTemplate::default()),
                    b"cpu" => {
                        if let Some(pending) = template.as_mut() {
                            pending.open(TemplateField::Cpu);
                        }
                    }
                    b"memory" => {
                        if let Some(pending) = template.as_mut() {
                            pending.open(TemplateField::Memory);
                        }
                    }
                    b"environment" => {
                        environment = Some(PendingEnvironment {
                            name: name_attribute(&element)?,
                            text: String::new(),
                        })
                    }
                    _ => {}
                },
                Event::Empty(element) => match element.local_name().as_ref() {
                    b"template" => {
                        let index = settings.templates.len();
                        settings.templates.push(PendingTemplate::default().finish(index)?);
                    }
                    b"cpu" | b"memory" => {
                        if let Some(pending) = template.as_mut() {
                            let field = if element.local_name().as_ref() == b"cpu" {
                                TemplateField::Cpu
                            } else {
                                TemplateField::Memory
                            };
                            pending.open(field);
                            pending.field = None;
                        }
                    }
                    b"environment" => {
                        let name = name_attribute(&element)?;
                        settings.environments.push(EnvironmentRule::new(name, "")?);
                    }
                    _ => {}
                },
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| InventoryError::settings(format!("invalid text: {}", e)))?;
                    if let Some(pending) = template.as_mut() {
                        pending.push_text(&text);
                    }
                    if let Some(pending) = environment.as_mut() {
                        pending.text.push_str(&text);
                    }
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    if let Some(pending) = template.as_mut() {
                        pending.push_text(&text);
                    }
                    if let Some(pending) = environment.as_mut() {
                        pending.text.push_str(&text);
                    }
                }
                Event::End(element) => match element.local_name().as_ref() {
                    b"cpu" | b"memory" => {
                        if let Some(pending) = template.as_mut() {
                            pending.field = None;
                        }
                    }
                    b"template" => {
                        if let Some(pending) = template.take() {
                            let index = settings.templates.len();
                            settings.templates.push(pending.finish(index)?);
                        }
                    }
                    b"environment" => {
                        if let Some(pending) = environment.take() {
                            let rule = EnvironmentRule::new(pending.name, pending.text.trim())?;
                            settings.environments.push(rule);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(settings)
    }

    /// File the settings were read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// CPU → base memory templates in document order
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Environment rules in document order
    pub fn environments(&self) -> &[EnvironmentRule] {
        &self.environments
    }
}
