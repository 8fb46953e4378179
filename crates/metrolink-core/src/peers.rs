//! Peer dependency collection across linked packages.

use crate::error::Error;
use crate::linked::LinkedPackage;
use crate::manifest;
use std::collections::BTreeSet;

/// Always part of the peer set: Babel's helper runtime, which transpiled
/// linked packages import without declaring.
pub const DEFAULT_PEER_DEPENDENCY: &str = "@babel/runtime";

/// Union the declared peer dependencies of every linked package.
///
/// The set is seeded with [`DEFAULT_PEER_DEPENDENCY`] and the caller's
/// `additional` names. A package without a manifest or without a
/// `peerDependencies` field contributes nothing.
pub fn collect_peer_dependencies(
    packages: &[LinkedPackage],
    additional: &[String],
) -> Result<BTreeSet<String>, Error> {
    let mut peers: BTreeSet<String> = BTreeSet::new();
    peers.insert(DEFAULT_PEER_DEPENDENCY.to_string());
    peers.extend(additional.iter().cloned());

    for pkg in packages {
        let Some(member) = manifest::read_package_json(&pkg.path)? else {
            continue;
        };
        peers.extend(member.peer_dependencies.keys().cloned());
    }

    Ok(peers)
}
