//! Who may cut.
//!
//! The cut processor consults an [`Authorizer`] before validating anything. The
//! stock policy is [`Ownership`]: a single owner principal that can hand the
//! role over or renounce it.

use parking_lot::RwLock;
use switchyard_types::Principal;

/// The caller is not allowed to cut.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{caller} is not authorized to cut")]
pub struct Denied {
	pub caller: Principal,
}

/// Access-control collaborator for cuts.
pub trait Authorizer: Send + Sync {
	fn authorize_cut(&self, caller: &Principal) -> Result<(), Denied>;
}

impl<F> Authorizer for F
where
	F: Fn(&Principal) -> bool + Send + Sync,
{
	fn authorize_cut(&self, caller: &Principal) -> Result<(), Denied> {
		if self(caller) {
			Ok(())
		} else {
			Err(Denied { caller: caller.clone() })
		}
	}
}

/// Authorizes every caller, for hosts that gate access upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
	fn authorize_cut(&self, _caller: &Principal) -> Result<(), Denied> {
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
	#[error("{caller} is not the owner")]
	NotOwner { caller: Principal },
}

/// Single-owner policy. With no owner, nobody may cut.
#[derive(Debug, Default)]
pub struct Ownership {
	owner: RwLock<Option<Principal>>,
}

impl Ownership {
	pub fn new(owner: Option<Principal>) -> Self {
		Self {
			owner: RwLock::new(owner),
		}
	}

	pub fn owner(&self) -> Option<Principal> {
		self.owner.read().clone()
	}

	/// Hands ownership to `new_owner`; `None` renounces it for good.
	pub fn transfer_ownership(&self, caller: &Principal, new_owner: Option<Principal>) -> Result<(), OwnershipError> {
		let mut owner = self.owner.write();
		if owner.as_ref() != Some(caller) {
			return Err(OwnershipError::NotOwner { caller: caller.clone() });
		}
		tracing::info!(
			previous = %caller,
			next = new_owner.as_ref().map_or("<none>", Principal::as_str),
			"ownership transferred"
		);
		*owner = new_owner;
		Ok(())
	}
}

impl Authorizer for Ownership {
	fn authorize_cut(&self, caller: &Principal) -> Result<(), Denied> {
		if self.owner.read().as_ref() == Some(caller) {
			Ok(())
		} else {
			Err(Denied { caller: caller.clone() })
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_owner_may_cut_and_transfer() {
		let alice = Principal::new("alice");
		let bob = Principal::new("bob");
		let ownership = Ownership::new(Some(alice.clone()));

		assert_eq!(ownership.authorize_cut(&alice), Ok(()));
		assert_eq!(ownership.authorize_cut(&bob), Err(Denied { caller: bob.clone() }));

		assert_eq!(
			ownership.transfer_ownership(&bob, Some(bob.clone())),
			Err(OwnershipError::NotOwner { caller: bob.clone() })
		);
		ownership.transfer_ownership(&alice, Some(bob.clone())).unwrap();
		assert_eq!(ownership.owner(), Some(bob.clone()));
		assert!(ownership.authorize_cut(&alice).is_err());
		assert!(ownership.authorize_cut(&bob).is_ok());
	}

	#[test]
	fn test_renounced_ownership_denies_everyone() {
		let alice = Principal::new("alice");
		let ownership = Ownership::new(Some(alice.clone()));
		ownership.transfer_ownership(&alice, None).unwrap();
		assert_eq!(ownership.owner(), None);
		assert!(ownership.authorize_cut(&alice).is_err());
		assert!(ownership.transfer_ownership(&alice, Some(alice.clone())).is_err());
	}

	#[test]
	fn test_closure_authorizer() {
		let only_ops = |caller: &Principal| caller.as_str().starts_with("ops-");
		assert!(only_ops.authorize_cut(&Principal::new("ops-1")).is_ok());
		assert!(only_ops.authorize_cut(&Principal::new("dev-1")).is_err());
		assert!(AllowAll.authorize_cut(&Principal::new("anyone")).is_ok());
	}
}
