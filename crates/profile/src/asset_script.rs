//! Projection of a [`Profile`] into Lua asset scripts.
//!
//! Each section has its own generator producing an independent fragment. Declarations (meta,
//! asset requires, module conditionals) are emitted at top level; everything with a side
//! effect runs inside `asset.onInitialize`. Empty sections produce empty fragments.
//!
//! Strings are written as Lua long-bracket literals (`[[...]]`, `[=[...]=]`, ...) whose level
//! is picked so the content can never terminate the literal early. Property values are script
//! expressions and are written verbatim.

use crate::entities::{Camera, CameraGoToGeo, CameraNavState, SetType, TimeType};
use crate::Profile;
use profile_types::DVec3;

/// One generated fragment per section, in the order they are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetSection {
    Meta,
    AddedAssets,
    Modules,
    Actions,
    Keybinds,
    Time,
    DeltaTimes,
    MarkNodes,
    Properties,
    Camera,
    AddedScripts,
}

impl AssetSection {
    pub const ALL: [AssetSection; 11] = [
        AssetSection::Meta,
        AssetSection::AddedAssets,
        AssetSection::Modules,
        AssetSection::Actions,
        AssetSection::Keybinds,
        AssetSection::Time,
        AssetSection::DeltaTimes,
        AssetSection::MarkNodes,
        AssetSection::Properties,
        AssetSection::Camera,
        AssetSection::AddedScripts,
    ];

    /// Section name used in the generated file name.
    pub fn name(self) -> &'static str {
        match self {
            AssetSection::Meta => "meta",
            AssetSection::AddedAssets => "addedAssets",
            AssetSection::Modules => "modules",
            AssetSection::Actions => "actions",
            AssetSection::Keybinds => "keybinds",
            AssetSection::Time => "time",
            AssetSection::DeltaTimes => "deltaTimes",
            AssetSection::MarkNodes => "markNodes",
            AssetSection::Properties => "properties",
            AssetSection::Camera => "camera",
            AssetSection::AddedScripts => "addedScripts",
        }
    }

    pub fn generate(self, profile: &Profile) -> String {
        match self {
            AssetSection::Meta => meta(profile),
            AssetSection::AddedAssets => added_assets(profile),
            AssetSection::Modules => modules(profile),
            AssetSection::Actions => actions(profile),
            AssetSection::Keybinds => keybinds(profile),
            AssetSection::Time => time(profile),
            AssetSection::DeltaTimes => delta_times(profile),
            AssetSection::MarkNodes => mark_nodes(profile),
            AssetSection::Properties => properties(profile),
            AssetSection::Camera => camera(profile),
            AssetSection::AddedScripts => added_scripts(profile),
        }
    }
}

/// Every fragment paired with its section, in [`AssetSection::ALL`] order.
pub fn generate_asset_scripts(profile: &Profile) -> Vec<(AssetSection, String)> {
    AssetSection::ALL
        .iter()
        .map(|section| (*section, section.generate(profile)))
        .collect()
}

/// `<prefix>_<section><extension>`
pub fn asset_file_name(prefix: &str, section: AssetSection, extension: &str) -> String {
    format!("{prefix}_{}{extension}", section.name())
}

/// Quote `text` as a Lua long-bracket string.
pub fn lua_string(text: &str) -> String {
    let mut level = 0;
    loop {
        let close = format!("]{}]", "=".repeat(level));
        // The closing bracket may also be completed by the content's own trailing `]`.
        let closed = format!("{text}{close}");
        if closed.find(&close) == Some(text.len()) {
            let open = format!("[{}[", "=".repeat(level));
            // Lua drops one line break (`\n`, `\r`, `\r\n` or `\n\r`) directly after the
            // opening bracket. Repeating the leading character keeps the text intact.
            let line_break = match text.chars().next() {
                Some(c @ ('\n' | '\r')) => c.to_string(),
                _ => String::new(),
            };
            return format!("{open}{line_break}{text}{close}");
        }
        level += 1;
    }
}

fn on_initialize(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    format!("asset.onInitialize(function()\n{body}end)\n")
}

fn vec3(v: &DVec3) -> String {
    format!("{{ {}, {}, {} }}", v.x, v.y, v.z)
}

pub fn meta(profile: &Profile) -> String {
    let Some(meta) = &profile.meta else {
        return String::new();
    };

    let mut output = String::from("asset.meta = {\n");
    let fields = [
        ("Name", &meta.name),
        ("Version", &meta.version),
        ("Description", &meta.description),
        ("Author", &meta.author),
        ("URL", &meta.url),
        ("License", &meta.license),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            output.push_str(&format!("  {key} = {},\n", lua_string(value)));
        }
    }
    output.push_str("}\n\n");
    output
}

pub fn added_assets(profile: &Profile) -> String {
    profile
        .assets
        .iter()
        .map(|asset| format!("asset.require({});\n", lua_string(asset)))
        .collect()
}

pub fn modules(profile: &Profile) -> String {
    profile
        .modules
        .iter()
        .map(|module| {
            format!(
                "if openspace.modules.isLoaded({}) then {} else {} end\n",
                lua_string(&module.name),
                module.loaded_instruction.as_deref().unwrap_or_default(),
                module.not_loaded_instruction.as_deref().unwrap_or_default(),
            )
        })
        .collect()
}

pub fn actions(profile: &Profile) -> String {
    let mut body = String::new();
    for action in &profile.actions {
        let name = if action.name.is_empty() {
            &action.identifier
        } else {
            &action.name
        };
        body.push_str(&format!(
            "  openspace.action.registerAction({{Identifier={}, Command={}, Name={}, \
             Documentation={}, GuiPath={}, IsLocal={}}})\n",
            lua_string(&action.identifier),
            lua_string(&action.script),
            lua_string(name),
            lua_string(&action.documentation),
            lua_string(&action.gui_path),
            action.is_local,
        ));
    }
    on_initialize(&body)
}

pub fn keybinds(profile: &Profile) -> String {
    let mut body = String::new();
    for binding in &profile.keybindings {
        body.push_str(&format!(
            "  openspace.bindKey({}, {})\n",
            lua_string(&binding.key.to_string()),
            lua_string(&binding.action),
        ));
    }
    on_initialize(&body)
}

pub fn time(profile: &Profile) -> String {
    let Some(time) = &profile.time else {
        return String::new();
    };
    let body = match time.time_type {
        TimeType::Absolute => format!("  openspace.time.setTime({})\n", lua_string(&time.value)),
        TimeType::Relative => format!(
            "  local now = openspace.time.currentWallTime();\n  \
             local prev = openspace.time.advancedTime(now, {});\n  \
             openspace.time.setTime(prev);\n",
            lua_string(&time.value)
        ),
    };
    on_initialize(&body)
}

pub fn delta_times(profile: &Profile) -> String {
    if profile.delta_times.is_empty() {
        return String::new();
    }
    let steps: String = profile.delta_times.iter().map(|d| format!("{d}, ")).collect();
    on_initialize(&format!("  openspace.time.setDeltaTimeSteps({{ {steps}}});\n"))
}

pub fn mark_nodes(profile: &Profile) -> String {
    if profile.mark_nodes.is_empty() {
        return String::new();
    }
    let nodes: String = profile
        .mark_nodes
        .iter()
        .map(|node| format!("{}, ", lua_string(node)))
        .collect();
    on_initialize(&format!("  openspace.markInterestingNodes({{ {nodes}}});\n"))
}

pub fn properties(profile: &Profile) -> String {
    let mut body = String::new();
    for property in &profile.properties {
        let function = match property.set_type {
            SetType::SetValue => "setPropertyValue",
            SetType::SetValueSingle => "setPropertyValueSingle",
        };
        body.push_str(&format!(
            "  openspace.{function}({}, {});\n",
            lua_string(&property.name),
            property.value
        ));
    }
    on_initialize(&body)
}

fn nav_state_call(state: &CameraNavState) -> String {
    let mut fields = vec![format!("Anchor = {}", lua_string(&state.anchor))];
    if let Some(aim) = &state.aim {
        fields.push(format!("Aim = {}", lua_string(aim)));
    }
    if !state.reference_frame.is_empty() {
        fields.push(format!(
            "ReferenceFrame = {}",
            lua_string(&state.reference_frame)
        ));
    }
    fields.push(format!("Position = {}", vec3(&state.position)));
    if let Some(up) = &state.up {
        fields.push(format!("Up = {}", vec3(up)));
    }
    if let Some(yaw) = state.yaw {
        fields.push(format!("Yaw = {yaw}"));
    }
    if let Some(pitch) = state.pitch {
        fields.push(format!("Pitch = {pitch}"));
    }
    format!(
        "  openspace.navigation.setNavigationState({{ {} }})\n",
        fields.join(", ")
    )
}

fn go_to_geo_call(geo: &CameraGoToGeo) -> String {
    let anchor = lua_string(&geo.anchor);
    match geo.altitude {
        Some(altitude) => format!(
            "  openspace.globebrowsing.goToGeo({anchor}, {}, {}, {altitude});\n",
            geo.latitude, geo.longitude
        ),
        None => format!(
            "  openspace.globebrowsing.goToGeo({anchor}, {}, {});\n",
            geo.latitude, geo.longitude
        ),
    }
}

pub fn camera(profile: &Profile) -> String {
    match &profile.camera {
        Some(Camera::NavState(state)) => on_initialize(&nav_state_call(state)),
        Some(Camera::GoToGeo(geo)) => on_initialize(&go_to_geo_call(geo)),
        None => String::new(),
    }
}

pub fn added_scripts(profile: &Profile) -> String {
    let body: String = profile
        .additional_scripts
        .iter()
        .map(|script| format!("  {script}\n"))
        .collect();
    on_initialize(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Action, Keybinding, Meta, Module, Property, Time};
    use profile_types::KeyWithModifier;

    #[test]
    fn plain_strings_use_level_zero_brackets() {
        assert_eq!(lua_string("Earth"), "[[Earth]]");
        assert_eq!(lua_string(""), "[[]]");
    }

    #[test]
    fn embedded_closing_brackets_raise_the_level() {
        assert_eq!(lua_string("a]]b"), "[=[a]]b]=]");
        assert_eq!(lua_string("x]]y]=]z"), "[==[x]]y]=]z]==]");
        // A trailing `]` would otherwise pair with the closing bracket.
        assert_eq!(lua_string("t["), "[[t[]]");
        assert_eq!(lua_string("t]"), "[=[t]]=]");
    }

    #[test]
    fn leading_line_break_is_preserved() {
        assert_eq!(lua_string("\nx"), "[[\n\nx]]");
        assert_eq!(lua_string("\rx"), "[[\r\rx]]");
        assert_eq!(lua_string("\r\nx"), "[[\r\r\nx]]");
        assert_eq!(lua_string("\n\rx"), "[[\n\n\rx]]");
        assert_eq!(lua_string("x\r"), "[[x\r]]");
    }

    #[test]
    fn empty_profile_yields_empty_fragments() {
        let profile = Profile::default();
        for (section, text) in generate_asset_scripts(&profile) {
            assert!(text.is_empty(), "{} should be empty", section.name());
        }
    }

    #[test]
    fn fragments_follow_section_order() {
        let names: Vec<&str> = generate_asset_scripts(&Profile::default())
            .into_iter()
            .map(|(section, _)| section.name())
            .collect();
        assert_eq!(
            names,
            [
                "meta",
                "addedAssets",
                "modules",
                "actions",
                "keybinds",
                "time",
                "deltaTimes",
                "markNodes",
                "properties",
                "camera",
                "addedScripts"
            ]
        );
        assert_eq!(
            asset_file_name("out/default", AssetSection::DeltaTimes, ".asset"),
            "out/default_deltaTimes.asset"
        );
    }

    #[test]
    fn meta_is_a_top_level_table() {
        let profile = Profile {
            meta: Some(Meta {
                name: Some("Default".into()),
                license: Some("MIT".into()),
                ..Meta::default()
            }),
            ..Profile::default()
        };
        assert_eq!(
            meta(&profile),
            "asset.meta = {\n  Name = [[Default]],\n  License = [[MIT]],\n}\n\n"
        );
    }

    #[test]
    fn assets_and_modules_are_declarations() {
        let profile = Profile {
            assets: vec!["base".into()],
            modules: vec![Module {
                name: "Globebrowsing".into(),
                loaded_instruction: Some("a()".into()),
                not_loaded_instruction: None,
            }],
            ..Profile::default()
        };
        assert_eq!(added_assets(&profile), "asset.require([[base]]);\n");
        assert_eq!(
            modules(&profile),
            "if openspace.modules.isLoaded([[Globebrowsing]]) then a() else  end\n"
        );
    }

    #[test]
    fn actions_fall_back_to_identifier_for_name() {
        let profile = Profile {
            actions: vec![Action {
                identifier: "id".into(),
                documentation: "doc".into(),
                name: String::new(),
                gui_path: "/".into(),
                is_local: true,
                script: "print(1)".into(),
            }],
            keybindings: vec![Keybinding {
                key: KeyWithModifier::parse("SHIFT+F1").expect("valid key"),
                action: "id".into(),
            }],
            ..Profile::default()
        };
        assert_eq!(
            actions(&profile),
            "asset.onInitialize(function()\n  openspace.action.registerAction({Identifier=[[id]], \
             Command=[[print(1)]], Name=[[id]], Documentation=[[doc]], GuiPath=[[/]], \
             IsLocal=true})\nend)\n"
        );
        assert_eq!(
            keybinds(&profile),
            "asset.onInitialize(function()\n  openspace.bindKey([[SHIFT+F1]], [[id]])\nend)\n"
        );
    }

    #[test]
    fn relative_time_advances_from_wall_time() {
        let profile = Profile {
            time: Some(Time {
                time_type: TimeType::Relative,
                value: "-1d".into(),
            }),
            ..Profile::default()
        };
        let text = time(&profile);
        assert!(text.contains("local now = openspace.time.currentWallTime();"));
        assert!(text.contains("openspace.time.advancedTime(now, [[-1d]]);"));
        assert!(text.ends_with("  openspace.time.setTime(prev);\nend)\n"));
    }

    #[test]
    fn lists_and_properties_are_initialized() {
        let profile = Profile {
            delta_times: vec![1.0, 0.5, 3600.0],
            mark_nodes: vec!["Earth".into()],
            properties: vec![Property {
                set_type: SetType::SetValueSingle,
                name: "Scene.Earth.Renderable.Enabled".into(),
                value: "false".into(),
            }],
            additional_scripts: vec!["openspace.printInfo('hi')".into()],
            ..Profile::default()
        };
        assert_eq!(
            delta_times(&profile),
            "asset.onInitialize(function()\n  openspace.time.setDeltaTimeSteps({ 1, 0.5, 3600, });\nend)\n"
        );
        assert_eq!(
            mark_nodes(&profile),
            "asset.onInitialize(function()\n  openspace.markInterestingNodes({ [[Earth]], });\nend)\n"
        );
        assert_eq!(
            properties(&profile),
            "asset.onInitialize(function()\n  openspace.setPropertyValueSingle([[Scene.Earth.Renderable.Enabled]], false);\nend)\n"
        );
        assert_eq!(
            added_scripts(&profile),
            "asset.onInitialize(function()\n  openspace.printInfo('hi')\nend)\n"
        );
    }

    #[test]
    fn camera_variants() {
        let nav = Profile {
            camera: Some(Camera::NavState(CameraNavState {
                anchor: "Earth".into(),
                aim: None,
                reference_frame: "Root".into(),
                position: DVec3::new(1.0, 2.5, -3.0),
                up: None,
                yaw: None,
                pitch: Some(0.25),
            })),
            ..Profile::default()
        };
        assert_eq!(
            camera(&nav),
            "asset.onInitialize(function()\n  openspace.navigation.setNavigationState({ Anchor = [[Earth]], \
             ReferenceFrame = [[Root]], Position = { 1, 2.5, -3 }, Pitch = 0.25 })\nend)\n"
        );

        let geo = Profile {
            camera: Some(Camera::GoToGeo(CameraGoToGeo {
                anchor: "Mars".into(),
                latitude: 10.0,
                longitude: -20.5,
                altitude: None,
            })),
            ..Profile::default()
        };
        assert_eq!(
            camera(&geo),
            "asset.onInitialize(function()\n  openspace.globebrowsing.goToGeo([[Mars]], 10, -20.5);\nend)\n"
        );
    }
}
