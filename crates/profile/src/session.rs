//! Read-only views of live application state consumed by [`crate::Profile::capture_session`].

use profile_types::DVec3;

/// A single property of the live property tree.
pub trait LiveProperty {
    /// Whether the current value differs from the value the property started with.
    fn has_changed(&self) -> bool;

    /// Dot-separated identifier unique across the whole tree.
    fn fully_qualified_identifier(&self) -> String;

    /// The current value rendered as script expression text.
    fn string_value(&self) -> String;
}

/// A node of the live property tree owning properties and further owners.
pub trait PropertyOwner {
    fn sub_owners(&self) -> Vec<&dyn PropertyOwner>;
    fn properties(&self) -> Vec<&dyn LiveProperty>;
}

/// Supplies the configured delta time steps, in order.
pub trait TimeStepSource {
    fn delta_time_steps(&self) -> Vec<f64>;
}

impl TimeStepSource for [f64] {
    fn delta_time_steps(&self) -> Vec<f64> {
        self.to_vec()
    }
}

impl TimeStepSource for Vec<f64> {
    fn delta_time_steps(&self) -> Vec<f64> {
        self.clone()
    }
}

/// The camera's navigation state as reported by the navigation handler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationState {
    pub anchor: String,
    pub aim: Option<String>,
    pub reference_frame: String,
    pub position: DVec3,
    pub up: Option<DVec3>,
    pub yaw: Option<f64>,
    pub pitch: Option<f64>,
}

/// Every changed property below `owner`, depth first with sub-owners visited before the
/// owner's own properties.
pub fn changed_properties(owner: &dyn PropertyOwner) -> Vec<&dyn LiveProperty> {
    let mut changed = Vec::new();
    collect_changed(owner, &mut changed);
    changed
}

fn collect_changed<'a>(owner: &'a dyn PropertyOwner, out: &mut Vec<&'a dyn LiveProperty>) {
    for sub in owner.sub_owners() {
        collect_changed(sub, out);
    }
    out.extend(owner.properties().into_iter().filter(|p| p.has_changed()));
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Prop {
        id: &'static str,
        changed: bool,
    }

    impl LiveProperty for Prop {
        fn has_changed(&self) -> bool {
            self.changed
        }

        fn fully_qualified_identifier(&self) -> String {
            self.id.to_string()
        }

        fn string_value(&self) -> String {
            "1".to_string()
        }
    }

    struct Owner {
        subs: Vec<Owner>,
        props: Vec<Prop>,
    }

    impl PropertyOwner for Owner {
        fn sub_owners(&self) -> Vec<&dyn PropertyOwner> {
            self.subs.iter().map(|o| o as &dyn PropertyOwner).collect()
        }

        fn properties(&self) -> Vec<&dyn LiveProperty> {
            self.props.iter().map(|p| p as &dyn LiveProperty).collect()
        }
    }

    #[test]
    fn walks_sub_owners_before_own_properties() {
        let root = Owner {
            props: vec![Prop { id: "Root.A", changed: true }],
            subs: vec![
                Owner {
                    props: vec![
                        Prop { id: "Root.X.B", changed: true },
                        Prop { id: "Root.X.C", changed: false },
                    ],
                    subs: vec![Owner {
                        props: vec![Prop { id: "Root.X.Y.D", changed: true }],
                        subs: Vec::new(),
                    }],
                },
                Owner {
                    props: vec![Prop { id: "Root.Z.E", changed: false }],
                    subs: Vec::new(),
                },
            ],
        };

        let ids: Vec<String> = changed_properties(&root)
            .iter()
            .map(|p| p.fully_qualified_identifier())
            .collect();
        assert_eq!(ids, ["Root.X.Y.D", "Root.X.B", "Root.A"]);
    }

    #[test]
    fn slices_are_time_step_sources() {
        let steps = vec![1.0, 60.0, 3600.0];
        assert_eq!(steps.delta_time_steps(), steps);
        assert_eq!(steps[..2].delta_time_steps(), vec![1.0, 60.0]);
    }
}
