//! Collapses per-scope values into one effective value.

use super::Scope;
use super::value::SettingValue;

/// How a global value constrains the narrower scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforcement {
    /// The most specific configured value wins.
    None,
    /// The global value is a ceiling no narrower scope can exceed.
    Cap,
    /// An enforced global value overrides every guild.
    Lock,
    /// Values from every scope are merged.
    Additive,
}

/// The values known for one request. Narrower layers are `None` when the
/// request has no such context or the setting does not exist at that scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Layers<V> {
    pub global: V,
    pub guild: Option<V>,
    pub channel: Option<V>,
    pub user: Option<V>,
}

impl<V> Layers<V> {
    pub fn global(global: V) -> Self {
        Self {
            global,
            guild: None,
            channel: None,
            user: None,
        }
    }

    pub fn with_guild(mut self, guild: V) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_channel(mut self, channel: V) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_user(mut self, user: V) -> Self {
        self.user = Some(user);
        self
    }
}

/// An effective value and the scope that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<V> {
    pub value: V,
    pub source: Scope,
}

/// Resolves `layers` under `mode`.
pub fn resolve<V: SettingValue>(mode: Enforcement, layers: Layers<V>) -> Resolved<V> {
    let Layers {
        global,
        guild,
        channel,
        user,
    } = layers;

    match mode {
        Enforcement::None => [
            (Scope::User, user),
            (Scope::Channel, channel),
            (Scope::Guild, guild),
        ]
        .into_iter()
        .find_map(|(source, value)| {
            value
                .filter(|value| !value.is_unset())
                .map(|value| Resolved { value, source })
        })
        .unwrap_or(Resolved {
            value: global,
            source: Scope::Global,
        }),

        Enforcement::Lock => match guild {
            Some(guild) if !global.is_enforced() => Resolved {
                value: guild,
                source: Scope::Guild,
            },
            _ => Resolved {
                value: global,
                source: Scope::Global,
            },
        },

        Enforcement::Cap => {
            let nominal = [(Scope::Channel, channel), (Scope::Guild, guild)]
                .into_iter()
                .find_map(|(source, value)| {
                    value
                        .filter(|value| !value.is_unset())
                        .map(|value| (source, value))
                });

            match nominal {
                Some((source, value)) => {
                    let capped = value.clone().cap_with(&global);
                    Resolved {
                        source: if capped == value { source } else { Scope::Global },
                        value: capped,
                    }
                }
                None => Resolved {
                    value: global,
                    source: Scope::Global,
                },
            }
        }

        Enforcement::Additive => {
            let mut source = Scope::Global;
            let mut value = global;
            for (scope, layer) in [
                (Scope::Guild, guild),
                (Scope::Channel, channel),
                (Scope::User, user),
            ] {
                if let Some(layer) = layer {
                    if !layer.is_unset() {
                        source = scope;
                    }
                    value = value.merge_with(layer);
                }
            }
            Resolved { value, source }
        }
    }
}
