//! Assembly of decoy rings around a spent output
//!
//! The server supplies decoy candidates; the wallet merges the real output
//! into them so that nothing downstream can tell which member is being
//! spent. Rings are ordered by global output index, so the real member is
//! placed by a sorted insert rather than appended.

use ensure_macro::ensure;

use crypto::ecc;
use ringct::Commitment;

use crate::{error::Error, DecoyOutput, RingMember, SpendableOutput};

/// Builds the ring for one spent output
///
/// Decoys are taken in global-index order until `ring_size - 1` are
/// accepted; a decoy that collides with the real output's global index is
/// skipped so the real output can never appear twice. Returns the ring and
/// the real member's position within it.
pub fn assemble_ring(
    real_output: &SpendableOutput,
    decoys: &[DecoyOutput],
    ring_size: u32,
) -> Result<(Vec<RingMember>, usize), Error> {
    let decoy_target = ring_size.saturating_sub(1) as usize;

    let mut candidates = decoys.to_vec();
    candidates.sort_unstable_by_key(|decoy| decoy.global_index);

    let mut ring = Vec::with_capacity(decoy_target + 1);
    for decoy in &candidates {
        if ring.len() == decoy_target {
            break;
        }
        if decoy.global_index == real_output.global_index {
            log::debug!(
                "decoy at global index {} collides with the spent output, skipping",
                decoy.global_index
            );
            continue;
        }

        let destination_key =
            ecc::point_from_hex(&decoy.public_key).map_err(|_| Error::InvalidPublicKey)?;
        let commitment = match &decoy.confidential {
            Some(blob) => blob
                .commitment()
                .map_err(|_| Error::MissingConfidentialCommitment)?,
            None => {
                // A plain decoy cannot stand in for a hidden amount
                ensure!(
                    real_output.confidential.is_none(),
                    Error::MixedConfidentialityInRing
                );
                Commitment::zero(real_output.amount).to_public().compress()
            }
        };

        ring.push(RingMember {
            global_index: decoy.global_index,
            destination_key,
            commitment,
        });
    }
    ensure!(ring.len() == decoy_target, Error::InsufficientDecoys);

    let destination_key =
        ecc::point_from_hex(&real_output.public_key).map_err(|_| Error::InvalidPublicKey)?;
    let commitment = match &real_output.confidential {
        Some(blob) => blob
            .commitment()
            .map_err(|_| Error::MissingConfidentialCommitment)?,
        None => Commitment::zero(real_output.amount).to_public().compress(),
    };

    // Sorted insert: before the first decoy with a larger (or, should the
    // dedup above ever be bypassed, equal) global index
    let real_index = ring
        .iter()
        .position(|member| real_output.global_index <= member.global_index)
        .unwrap_or_else(|| ring.len());
    ring.insert(
        real_index,
        RingMember {
            global_index: real_output.global_index,
            destination_key,
            commitment,
        },
    );

    Ok((ring, real_index))
}
