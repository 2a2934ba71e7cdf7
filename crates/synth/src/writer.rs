use crate::error::{Result, SynthError};
use crate::render::StubRenderer;
use portmap_mapper::{to_snake_case, RoutingTable};
use portmap_protocol::SourceDeclaration;
use portmap_scanner::TargetInventory;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A skeleton about to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStub {
    pub name: String,
    pub package: String,
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SynthReport {
    /// Files written by this run.
    pub created: Vec<PathBuf>,
    /// Planned files that were already on disk and left untouched.
    pub existing: Vec<PathBuf>,
    /// Declarations skipped because the inventory already has the type.
    pub already_ported: usize,
}

/// Writes skeletons for declarations the target tree does not have yet.
///
/// A declaration is considered present when the inventory has the same
/// (package, name), or the same name in any package. Files are only ever
/// created, never overwritten.
pub struct StubSynthesizer {
    renderer: StubRenderer,
    routing: RoutingTable,
    extension: String,
}

impl StubSynthesizer {
    pub fn new(renderer: StubRenderer, routing: RoutingTable, extension: impl Into<String>) -> Self {
        Self {
            renderer,
            routing,
            extension: extension.into(),
        }
    }

    /// Path of the skeleton for `decl` routed to `package` under `src_root`.
    pub fn stub_path(&self, src_root: &Path, decl: &SourceDeclaration, package: &str) -> PathBuf {
        src_root
            .join(self.routing.relative_dir(package))
            .join(format!("{}.{}", to_snake_case(&decl.name), self.extension))
    }

    pub fn plan(
        &self,
        sources: &[SourceDeclaration],
        inventory: &TargetInventory,
        src_root: &Path,
    ) -> (Vec<PlannedStub>, usize) {
        let mut planned = Vec::new();
        let mut already_ported = 0usize;

        for decl in sources {
            let package = self.routing.target_package(decl);
            if inventory.contains(&package, &decl.name) || inventory.contains_name(&decl.name) {
                already_ported += 1;
                continue;
            }
            planned.push(PlannedStub {
                name: decl.name.clone(),
                path: self.stub_path(src_root, decl, &package),
                contents: self.renderer.render(decl, &package),
                package,
            });
        }

        (planned, already_ported)
    }

    pub fn write(&self, planned: &[PlannedStub]) -> Result<SynthReport> {
        let mut report = SynthReport::default();
        for stub in planned {
            if write_if_absent(&stub.path, &stub.contents)? {
                log::debug!("Created {} ({}.{})", stub.path.display(), stub.package, stub.name);
                report.created.push(stub.path.clone());
            } else {
                log::debug!("Keeping existing {}", stub.path.display());
                report.existing.push(stub.path.clone());
            }
        }
        Ok(report)
    }

    pub fn synthesize(
        &self,
        sources: &[SourceDeclaration],
        inventory: &TargetInventory,
        src_root: &Path,
    ) -> Result<SynthReport> {
        let (planned, already_ported) = self.plan(sources, inventory, src_root);
        let mut report = self.write(&planned)?;
        report.already_ported = already_ported;
        log::info!(
            "Generated {} files ({} already on disk, {} already ported)",
            report.created.len(),
            report.existing.len(),
            report.already_ported
        );
        Ok(report)
    }
}

/// `Ok(false)` when the file already exists.
fn write_if_absent(path: &Path, contents: &str) -> Result<bool> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SynthError::io(parent, e))?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(SynthError::io(path, e)),
    };
    file.write_all(contents.as_bytes())
        .map_err(|e| SynthError::io(path, e))?;
    Ok(true)
}
