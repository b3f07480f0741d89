//! Protocol construction.
//!
//! Validation runs eagerly and in a fixed order: duplicate declarations,
//! then cross-scope collisions, then reserved names. Keys are minted only
//! once every check has passed, so a rejected spec never mints anything.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::DefineConfig;
use crate::error::DefinitionError;
use crate::key::MemberKey;
use crate::member::{Member, MemberDecl, MemberName, Scope};

use super::spec::ProtocolSpec;
use super::Protocol;

/// Validates a spec and seals it into a protocol, using the default config.
pub fn define(spec: ProtocolSpec) -> Result<Protocol, DefinitionError> {
    define_with(spec, &DefineConfig::default())
}

/// Validates a spec and seals it into a protocol.
///
/// # Errors
/// - `DuplicateMember`: a name is declared twice in one scope
/// - `CrossScopeCollision`: a name is declared in both scopes
/// - `ReservedName`: a provided member shadows the construction hook
///   (instance) or the template link (static)
/// - `TooManyMembers` / `TooManyParents`: the spec exceeds configured limits
/// - `InvalidConfig`: `config` fails [`DefineConfig::validate`]
pub fn define_with(spec: ProtocolSpec, config: &DefineConfig) -> Result<Protocol, DefinitionError> {
    let ProtocolSpec {
        name,
        parents,
        members,
    } = spec;
    let config = config.clone().validate()?;

    if members.len() > config.max_members {
        return Err(DefinitionError::TooManyMembers {
            protocol: name,
            max: config.max_members,
        });
    }
    if parents.len() > config.max_parents {
        return Err(DefinitionError::TooManyParents {
            protocol: name,
            max: config.max_parents,
        });
    }

    check_duplicates(&members)?;
    check_cross_scope(&members)?;
    check_reserved(&members, &config)?;

    let mut names: HashMap<String, MemberKey> = HashMap::new();
    let mut sealed = Vec::with_capacity(members.len());
    for decl in members {
        let key = match &decl.name {
            MemberName::Ident(ident) => MemberKey::mint(mint_label(&name, ident, &decl)),
            MemberName::Key(key) => key.clone(),
        };
        if let Some(lookup) = decl.name.lookup_name() {
            names.insert(lookup.to_string(), key.clone());
        }
        sealed.push(Member::new(key, decl.scope, decl.body));
    }

    debug!(
        protocol = %name,
        parents = parents.len(),
        members = sealed.len(),
        "protocol sealed"
    );

    Ok(Protocol::seal(name, parents, sealed, names))
}

/// Every declaration that `Protocol::key` will index, with its scope.
///
/// Identifiers and string literals share one lookup table, so `a` and `"a"`
/// name the same member.
fn lookup_names(members: &[MemberDecl]) -> impl Iterator<Item = (&str, Scope)> {
    members
        .iter()
        .filter_map(|decl| decl.name.lookup_name().map(|name| (name, decl.scope)))
}

fn check_duplicates(members: &[MemberDecl]) -> Result<(), DefinitionError> {
    let mut seen: HashSet<(&str, Scope)> = HashSet::new();
    for (name, scope) in lookup_names(members) {
        if !seen.insert((name, scope)) {
            return Err(DefinitionError::DuplicateMember {
                name: name.to_string(),
                scope,
            });
        }
    }
    Ok(())
}

fn check_cross_scope(members: &[MemberDecl]) -> Result<(), DefinitionError> {
    let statics: HashSet<&str> = lookup_names(members)
        .filter(|(_, scope)| *scope == Scope::Static)
        .map(|(name, _)| name)
        .collect();

    for (name, scope) in lookup_names(members) {
        if scope == Scope::Instance && statics.contains(name) {
            return Err(DefinitionError::CrossScopeCollision {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn check_reserved(members: &[MemberDecl], config: &DefineConfig) -> Result<(), DefinitionError> {
    for decl in members.iter().filter(|decl| decl.body.is_some()) {
        let Some(name) = decl.name.lookup_name() else {
            continue;
        };
        let reserved = match decl.scope {
            Scope::Instance => &config.construction_hook,
            Scope::Static => &config.template_link,
        };
        if name == reserved.as_str() {
            return Err(DefinitionError::ReservedName {
                name: name.to_string(),
                scope: decl.scope,
            });
        }
    }
    Ok(())
}

fn mint_label(protocol: &str, ident: &str, decl: &MemberDecl) -> String {
    let scope = match decl.scope {
        Scope::Instance => "",
        Scope::Static => "static ",
    };
    let accessor = decl.body.as_ref().map_or("", |body| body.label_prefix());
    if protocol.is_empty() {
        format!("{scope}{accessor}{ident}")
    } else {
        format!("{scope}{accessor}{protocol}.{ident}")
    }
}
