/// A pickup location offered on the branch selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub id: &'static str,
    pub name: &'static str,
    pub area: &'static str,
}

pub static BRANCHES: [Branch; 4] = [
    Branch {
        id: "thandra_madhapur",
        name: "Madhapur",
        area: "Hitech City, Hyderabad",
    },
    Branch {
        id: "thandra_dsnr",
        name: "Dilsukhnagar",
        area: "Malakpet Road, Hyderabad",
    },
    Branch {
        id: "thandra_bnreddy",
        name: "BN Reddy",
        area: "Vanasthalipuram, Hyderabad",
    },
    Branch {
        id: "thandra_jntu",
        name: "JNTU",
        area: "Kukatpally, Hyderabad",
    },
];

impl Branch {
    /// Every branch, in display order.
    pub fn all() -> &'static [Branch] {
        &BRANCHES
    }

    pub fn find(id: &str) -> Option<&'static Branch> {
        BRANCHES.iter().find(|b| b.id == id)
    }

    /// Looks a branch up by its 1-based position in the displayed list.
    pub fn by_position(position: usize) -> Option<&'static Branch> {
        position.checked_sub(1).and_then(|i| BRANCHES.get(i))
    }
}
