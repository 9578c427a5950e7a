//! Remote operations issued by the requester.

/// One requester-level operation. Each maps onto one or more capability calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateHit,
    DisableHit,
    ApproveAssignment,
    RejectAssignment,
    GrantBonus,
    BlockWorker,
    UnblockWorker,
    NotifyWorkers,
    GetAccountBalance,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateHit => "CreateHIT",
            Operation::DisableHit => "DisableHIT",
            Operation::ApproveAssignment => "ApproveAssignment",
            Operation::RejectAssignment => "RejectAssignment",
            Operation::GrantBonus => "GrantBonus",
            Operation::BlockWorker => "BlockWorker",
            Operation::UnblockWorker => "UnblockWorker",
            Operation::NotifyWorkers => "NotifyWorkers",
            Operation::GetAccountBalance => "GetAccountBalance",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_marketplace_names() {
        assert_eq!(Operation::CreateHit.to_string(), "CreateHIT");
        assert_eq!(Operation::DisableHit.to_string(), "DisableHIT");
        assert_eq!(Operation::GetAccountBalance.to_string(), "GetAccountBalance");
    }
}
