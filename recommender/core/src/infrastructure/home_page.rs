// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Home Page Renderer
//!
//! Renders the search page served at `/`, using Handlebars. The template is
//! compiled into the binary and registered once at startup.
//!
//! # Supported Placeholders
//!
//! - `{{service_name}}` - `metadata.name` from the service configuration
//! - `{{course_count}}` - number of courses in the loaded model
//! - `{{default_count}}` - recommendations requested by the search form
//! - `{{#if available}}` - whether the model loaded

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

const INDEX_TEMPLATE_NAME: &str = "index";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.hbs");

#[derive(Debug, Clone, Serialize)]
pub struct HomePageContext {
    pub service_name: String,
    pub available: bool,
    pub course_count: usize,
    pub default_count: usize,
}

pub struct HomePage {
    handlebars: Handlebars<'static>,
}

impl HomePage {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars
            .register_template_string(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)
            .context("Invalid home page template")?;

        Ok(Self { handlebars })
    }

    pub fn render(&self, context: &HomePageContext) -> Result<String> {
        self.handlebars
            .render(INDEX_TEMPLATE_NAME, context)
            .context("Failed to render home page")
    }
}
