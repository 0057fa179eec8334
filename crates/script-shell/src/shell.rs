//! Shell document abstraction.

use std::cell::RefCell;
use std::rc::Rc;

use script_core::{AppendTarget, HostError, ScriptHost, ScriptTag, WorkerChannels};

/// Workers cannot exist during server rendering.
pub enum NoWorker {}

#[derive(Default)]
struct ShellState {
    next_id: usize,
    /// Created but not yet appended.
    detached: Vec<(usize, ScriptTag)>,
    head: Vec<(usize, ScriptTag)>,
    body: Vec<(usize, ScriptTag)>,
    title: Option<String>,
}

impl ShellState {
    fn section_mut(&mut self, target: AppendTarget) -> &mut Vec<(usize, ScriptTag)> {
        match target {
            AppendTarget::Head => &mut self.head,
            AppendTarget::Body => &mut self.body,
        }
    }
}

/// An HTML shell under construction.
///
/// Cheap to clone; clones share the same buffers, so the handle given to a
/// component and the handle kept for rendering see the same document.
#[derive(Clone, Default)]
pub struct ShellDocument {
    state: Rc<RefCell<ShellState>>,
}

impl ShellDocument {
    /// Create an empty shell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.state.borrow_mut().title = Some(title.into());
        self
    }

    /// Number of script tags currently attached to the given section.
    pub fn script_count(&self, target: AppendTarget) -> usize {
        match target {
            AppendTarget::Head => self.state.borrow().head.len(),
            AppendTarget::Body => self.state.borrow().body.len(),
        }
    }

    /// Render the script tags attached to the head.
    pub fn render_head(&self) -> String {
        let state = self.state.borrow();
        let mut html = String::new();

        if let Some(title) = &state.title {
            html.push_str(&format!("<title>{}</title>\n", title));
        }

        for (_, tag) in &state.head {
            html.push_str(&render_tag(tag));
            html.push('\n');
        }

        html
    }

    /// Render the script tags attached to the body.
    pub fn render_body(&self) -> String {
        let state = self.state.borrow();
        let mut html = String::new();

        for (_, tag) in &state.body {
            html.push_str(&render_tag(tag));
            html.push('\n');
        }

        html
    }

    /// Render the complete document around the given body content.
    pub fn render(&self, body_html: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n{}</head>\n<body>\n{}{}</body>\n</html>",
            self.render_head(),
            body_html,
            self.render_body(),
        )
    }
}

/// Render one script tag with its attributes.
fn render_tag(tag: &ScriptTag) -> String {
    let mut attrs = format!(r#" type="{}""#, tag.content_type);

    if let Some(src) = &tag.src {
        attrs.push_str(&format!(r#" src="{}""#, src));
    }
    if let Some(integrity) = &tag.integrity {
        attrs.push_str(&format!(r#" integrity="{}""#, integrity));
    }
    if let Some(cross_origin) = &tag.cross_origin {
        attrs.push_str(&format!(r#" crossorigin="{}""#, cross_origin));
    }
    if tag.defer {
        attrs.push_str(" defer");
    }
    if tag.async_ {
        attrs.push_str(" async");
    }

    let text = tag.text.as_deref().unwrap_or_default();
    format!("<script{}>{}</script>", attrs, text)
}

impl ScriptHost for ShellDocument {
    type Node = usize;
    type Worker = NoWorker;

    fn create_script_element(&self, tag: &ScriptTag) -> Result<usize, HostError> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.detached.push((id, tag.clone()));
        Ok(id)
    }

    fn on_load(&self, _node: &usize, _callback: Box<dyn FnOnce()>) {
        // No load events during server rendering; the callback never fires.
    }

    fn append_to(&self, target: AppendTarget, node: &usize) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        let position = state
            .detached
            .iter()
            .position(|(id, _)| id == node)
            .ok_or_else(|| HostError::Dom("unknown script element".to_string()))?;
        let entry = state.detached.remove(position);
        state.section_mut(target).push(entry);
        Ok(())
    }

    fn remove_from(&self, target: AppendTarget, node: &usize) -> Result<(), HostError> {
        let mut state = self.state.borrow_mut();
        let section = state.section_mut(target);
        let position = section
            .iter()
            .position(|(id, _)| id == node)
            .ok_or_else(|| HostError::Dom("script element is not attached".to_string()))?;
        section.remove(position);
        Ok(())
    }

    fn supports_idle_callback(&self) -> bool {
        // There is no idle period while generating a document.
        false
    }

    fn schedule_idle(&self, _callback: Box<dyn FnOnce()>) {}

    fn supports_workers(&self) -> bool {
        false
    }

    fn spawn_worker(
        &self,
        _source: &str,
        _channels: WorkerChannels,
    ) -> Result<NoWorker, HostError> {
        Err(HostError::WorkerStart(
            "workers are not available during server rendering".to_string(),
        ))
    }

    fn terminate_worker(&self, worker: NoWorker) {
        match worker {}
    }
}
