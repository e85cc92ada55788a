use {
    airdrop_types::{AirdropError, AirdropResult, Recipient, Uint128},
    serde::{Deserialize, Serialize},
    serde_with::{serde_as, DisplayFromStr},
};

/// A consecutive slice of a recipient list, distributed in one transaction.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub index: usize,
    pub recipients: Vec<Recipient>,
    #[serde_as(as = "DisplayFromStr")]
    pub total_amount: Uint128,
}

/// Split a recipient list into consecutive batches of at most `size`
/// recipients, keeping the input order.
pub fn batches(recipients: &[Recipient], size: usize) -> AirdropResult<Vec<Batch>> {
    if size == 0 {
        return Err(AirdropError::validation("batch size must be positive"));
    }

    recipients
        .chunks(size)
        .enumerate()
        .map(|(index, chunk)| {
            let total_amount = chunk.iter().try_fold(0 as Uint128, |total, recipient| {
                total.checked_add(recipient.amount).ok_or_else(|| {
                    AirdropError::validation(format!("total amount of batch {index} overflows"))
                })
            })?;

            Ok(Batch {
                index,
                recipients: chunk.to_vec(),
                total_amount,
            })
        })
        .collect()
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        airdrop_types::{Addr, ResultExt},
        test_case::test_case,
    };

    fn recipients(count: u8) -> Vec<Recipient> {
        (1..=count)
            .map(|i| Recipient::new(Addr::mock(i), i as Uint128))
            .collect()
    }

    #[test_case(10, 3, &[3, 3, 3, 1] ; "uneven split")]
    #[test_case(10, 5, &[5, 5] ; "even split")]
    #[test_case(3, 100, &[3] ; "single batch")]
    #[test_case(0, 5, &[] ; "no recipients")]
    fn batch_sizes(count: u8, size: usize, expect: &[usize]) {
        let batches = batches(&recipients(count), size).should_succeed();

        let sizes = batches.iter().map(|b| b.recipients.len()).collect::<Vec<_>>();
        assert_eq!(sizes, expect);

        let total = batches.iter().map(|b| b.total_amount).sum::<Uint128>();
        assert_eq!(total, (1..=count as Uint128).sum::<Uint128>());
    }

    #[test]
    fn batches_keep_order() {
        let batches = batches(&recipients(4), 3).should_succeed();

        assert_eq!(batches[1].index, 1);
        assert_eq!(batches[1].recipients[0].address, Addr::mock(4));
        assert_eq!(batches[0].total_amount, 6);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        batches(&recipients(1), 0).should_fail_with_error("batch size must be positive");
    }
}
