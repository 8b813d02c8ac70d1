//! Call-depth tracking and trace line rendering

use crate::event::{EventKind, TraceEvent};

/// Output verbosity, one per run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Every executed line (default)
    #[default]
    Full,
    /// Module name on each change of module
    ModuleOnly,
    /// Function calls only
    CallsOnly,
}

/// Mutable state shared by every event of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceState {
    /// Signed call depth. Goes negative when tracing starts mid-stack and
    /// more returns than calls are seen.
    pub depth: i64,
    pub last_shown_module: Option<String>,
}

impl TraceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the depth change for an event; lines leave depth untouched
    pub fn apply(&mut self, kind: EventKind) {
        match kind {
            EventKind::Call => self.depth += 1,
            EventKind::Return => self.depth -= 1,
            EventKind::Line => {}
        }
    }

    /// Depth used for the dash run, floored at zero
    pub fn render_depth(&self) -> usize {
        usize::try_from(self.depth).unwrap_or(0)
    }

    /// `DD` + dashes + `>`: the signed depth zero padded to two digits,
    /// then one dash per rendering level
    pub fn prefix(&self) -> String {
        format!("{:02}{}>", self.depth, "-".repeat(self.render_depth()))
    }

    /// Render an accepted event, or `None` when the mode hides it
    ///
    /// Depth must already reflect `event`. Blank source text suppresses
    /// output in every mode. Records the module on emission.
    pub fn render(
        &mut self,
        event: &TraceEvent,
        source_text: &str,
        mode: DisplayMode,
    ) -> Option<String> {
        if source_text.trim().is_empty() {
            return None;
        }

        let module = event.module_name();
        let line = match mode {
            DisplayMode::ModuleOnly => {
                if event.kind != EventKind::Line
                    || self.last_shown_module.as_deref() == Some(module)
                {
                    return None;
                }
                format!("{}{}", self.prefix(), module)
            }
            DisplayMode::CallsOnly if event.kind == EventKind::Call => {
                format!("{}{}:{}: {}", self.prefix(), module, event.line, source_text)
            }
            DisplayMode::Full if event.kind == EventKind::Line => {
                format!("{}{}:{}: {}", self.prefix(), module, event.line, source_text)
            }
            DisplayMode::CallsOnly | DisplayMode::Full => return None,
        };

        self.last_shown_module = Some(module.to_string());
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_balance() {
        let mut state = TraceState::new();
        state.apply(EventKind::Call);
        state.apply(EventKind::Call);
        assert_eq!(state.depth, 2);
        state.apply(EventKind::Line);
        assert_eq!(state.depth, 2);
        state.apply(EventKind::Return);
        state.apply(EventKind::Return);
        assert_eq!(state.depth, 0);
    }

    #[test]
    fn test_prefix_format() {
        let mut state = TraceState::new();
        assert_eq!(state.prefix(), "00>");
        state.depth = 1;
        assert_eq!(state.prefix(), "01->");
        state.depth = 12;
        assert_eq!(state.prefix(), format!("12{}>", "-".repeat(12)));
    }

    #[test]
    fn test_negative_depth_renders_without_dashes() {
        let mut state = TraceState::new();
        state.apply(EventKind::Return);
        assert_eq!(state.depth, -1);
        assert_eq!(state.render_depth(), 0);
        assert_eq!(state.prefix(), "-1>");
    }

    #[test]
    fn test_full_mode_shows_lines_only() {
        let mut state = TraceState { depth: 1, ..Default::default() };
        let line = TraceEvent::line("myapp", "myapp/x.py", 11);
        let call = TraceEvent::call("myapp", "myapp/x.py", 10);

        assert_eq!(
            state.render(&line, "y = 1", DisplayMode::Full).as_deref(),
            Some("01->myapp:11: y = 1")
        );
        assert_eq!(state.render(&call, "def x():", DisplayMode::Full), None);
    }

    #[test]
    fn test_calls_only_mode() {
        let mut state = TraceState { depth: 2, ..Default::default() };
        let call = TraceEvent::call("pkg.mod", "pkg/mod.py", 4);
        let line = TraceEvent::line("pkg.mod", "pkg/mod.py", 5);

        assert_eq!(
            state.render(&call, "def handler(req):", DisplayMode::CallsOnly).as_deref(),
            Some("02-->pkg.mod:4: def handler(req):")
        );
        assert_eq!(state.render(&line, "return req", DisplayMode::CallsOnly), None);
    }

    #[test]
    fn test_module_only_skips_repeats() {
        let mut state = TraceState { depth: 1, ..Default::default() };
        let a = TraceEvent::line("a", "a.py", 1);
        let a_call = TraceEvent::call("a", "a.py", 2);
        let b = TraceEvent::line("b", "b.py", 1);

        assert_eq!(
            state.render(&a, "x = 1", DisplayMode::ModuleOnly).as_deref(),
            Some("01->a")
        );
        assert_eq!(state.render(&a_call, "def f():", DisplayMode::ModuleOnly), None);
        assert_eq!(state.render(&a, "x = 2", DisplayMode::ModuleOnly), None);
        assert_eq!(
            state.render(&b, "y = 1", DisplayMode::ModuleOnly).as_deref(),
            Some("01->b")
        );
        assert_eq!(
            state.render(&a, "x = 3", DisplayMode::ModuleOnly).as_deref(),
            Some("01->a")
        );
    }

    #[test]
    fn test_blank_source_suppressed_in_every_mode() {
        for mode in [DisplayMode::Full, DisplayMode::ModuleOnly, DisplayMode::CallsOnly] {
            let mut state = TraceState::new();
            let line = TraceEvent::line("m", "m.py", 1);
            let call = TraceEvent::call("m", "m.py", 1);
            assert_eq!(state.render(&line, "   ", mode), None);
            assert_eq!(state.render(&call, "", mode), None);
            assert!(state.last_shown_module.is_none());
        }
    }

    #[test]
    fn test_last_shown_only_updates_on_emission() {
        let mut state = TraceState::new();
        let call = TraceEvent::call("m", "m.py", 1);
        assert_eq!(state.render(&call, "def f():", DisplayMode::Full), None);
        assert!(state.last_shown_module.is_none());
    }
}
