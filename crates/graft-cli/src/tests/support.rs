//! Shared fixtures: an on-disk Angular workspace and a fixed config loader.

use std::ffi::OsString;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use graft_config::Config;
use tempfile::TempDir;

use crate::{AppError, ConfigLoader};

pub(super) const ANGULAR_JSON: &str = r#"{
  "version": 1,
  "projects": {
    "angular-demo": {
      "projectType": "application",
      "root": "",
      "sourceRoot": "src"
    }
  },
  "defaultProject": "angular-demo"
}
"#;

pub(super) const PACKAGE_JSON: &str = r#"{
  "name": "angular-demo",
  "version": "0.0.0",
  "private": true,
  "dependencies": {
    "rxjs": "~7.5.0",
    "@angular/core": "^14.2.0"
  }
}
"#;

pub(super) const APP_MODULE: &str = "\
import { NgModule } from '@angular/core';
import { BrowserModule } from '@angular/platform-browser';

import { AppComponent } from './app.component';

@NgModule({
  declarations: [
    AppComponent
  ],
  imports: [
    BrowserModule
  ],
  providers: [],
  bootstrap: [AppComponent]
})
export class AppModule { }
";

pub(super) const APP_COMPONENT: &str = "\
import { Component } from '@angular/core';

@Component({
  selector: 'app-root',
  templateUrl: './app.component.html',
  styleUrls: ['./app.component.css']
})
export class AppComponent {
  title = 'angular-demo';
}
";

pub(super) const APP_TEMPLATE: &str = "<h1>{{ title }}</h1>\n";

pub(super) const MODULE_PATH: &str = "src/app/app.module.ts";
pub(super) const COMPONENT_PATH: &str = "src/app/app.component.ts";
pub(super) const TEMPLATE_PATH: &str = "src/app/app.component.html";

/// A temporary Angular workspace seeded with a freshly generated app.
pub(super) struct WorkspaceFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl WorkspaceFixture {
    pub(super) fn angular() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
        let fixture = Self { _dir: dir, root };
        fixture.write("angular.json", ANGULAR_JSON);
        fixture.write("package.json", PACKAGE_JSON);
        fixture.write(MODULE_PATH, APP_MODULE);
        fixture.write(COMPONENT_PATH, APP_COMPONENT);
        fixture.write(TEMPLATE_PATH, APP_TEMPLATE);
        fixture
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write(&self, relative: &str, text: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, text).expect("write fixture file");
    }

    pub(super) fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).expect("read fixture file")
    }

    pub(super) fn remove(&self, relative: &str) {
        fs::remove_file(self.root.join(relative)).expect("remove fixture file");
    }

    /// Contents of every patched document, for before/after comparisons.
    pub(super) fn contents(&self) -> Vec<String> {
        ["package.json", MODULE_PATH, COMPONENT_PATH, TEMPLATE_PATH]
            .into_iter()
            .map(|relative| self.read(relative))
            .collect()
    }

    pub(super) fn args(&self, command: &[&str]) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("graft"),
            OsString::from("--root"),
            OsString::from(self.root.as_str()),
        ];
        args.extend(command.iter().map(OsString::from));
        args
    }
}

/// Loader returning built-in defaults without touching the environment.
pub(super) struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(Config::default())
    }
}
