//! Debug command implementation

use sumo_core::{ComponentKind, ComponentSet, Dashboard, Folder, Panel, SavedSearch, Variable};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Print the resolved component `key` of kind `kind` in `overlay` as YAML.
pub fn run_debug_load(ctx: &Context, overlay: &str, kind: ComponentKind, key: &str) -> Result<()> {
    let application = ctx.load_application()?;
    let components = &application.overlay(overlay)?.components;

    let rendered = render(components, kind, key)?.ok_or_else(|| {
        CliError::user(format!("No {kind} '{key}' in overlay '{overlay}'"))
    })?;
    print!("{rendered}");
    Ok(())
}

fn render(set: &ComponentSet, kind: ComponentKind, key: &str) -> Result<Option<String>> {
    let rendered = match kind {
        ComponentKind::Variable => set.get::<Variable>(key).map(serde_yaml::to_string),
        ComponentKind::Panel => set.get::<Panel>(key).map(serde_yaml::to_string),
        ComponentKind::Dashboard => set.get::<Dashboard>(key).map(serde_yaml::to_string),
        ComponentKind::SavedSearch => set.get::<SavedSearch>(key).map(serde_yaml::to_string),
        ComponentKind::Folder => set.get::<Folder>(key).map(serde_yaml::to_string),
    };
    Ok(rendered.transpose()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo_core::Component;

    #[test]
    fn renders_requested_kind_only() {
        let mut set = ComponentSet::default();
        let mut panel = Panel {
            title: "CPU".into(),
            ..Default::default()
        };
        panel.set_key("cpu");
        set.insert(panel);

        let yaml = render(&set, ComponentKind::Panel, "cpu").unwrap().unwrap();
        assert!(yaml.contains("title: CPU"));
        assert!(render(&set, ComponentKind::Variable, "cpu").unwrap().is_none());
    }
}
