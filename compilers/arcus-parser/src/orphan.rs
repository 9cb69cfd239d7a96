use arcus_protocol::{Arc, ArcSet, TokenId, ROOT_LABEL};
use tracing::trace;

/// Attaches every token in `1..len` that has no head to the root with label
/// `root`. Returns how many arcs were added; zero on an already total arc set.
pub fn attach_orphans(arcs: &mut ArcSet, len: usize) -> usize {
    let mut attached = vec![false; len];
    for arc in arcs.iter() {
        if let Some(slot) = attached.get_mut(arc.dependent.index()) {
            *slot = true;
        }
    }

    let mut added = 0;
    for index in (1..len).filter(|&i| !attached[i]) {
        let orphan = TokenId::from_index(index);
        trace!(token = %orphan, "attaching orphan to root");
        arcs.push(Arc::new(TokenId::ROOT, orphan, ROOT_LABEL));
        added += 1;
    }
    added
}
