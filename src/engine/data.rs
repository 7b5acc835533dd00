use bytes::Bytes;

/// The indivisible unit of comparison: one line of the source buffer.
///
/// An atom references its bytes as a `[at, at + len)` range into the root
/// buffer it was parsed from. The hash is a cheap filter for finding
/// *mismatching* atoms quickly; matching hashes still require a byte
/// comparison before two atoms count as identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atom {
    pub at: usize,
    pub len: usize,
    pub hash: u32,
}

/// A root diff input: the byte buffer of one side plus the atoms parsed
/// from it.
///
/// The buffer is held as [`Bytes`] so the caller can hand over file
/// contents without copying. Atoms are written once by the atomizer and
/// read-only afterwards; recursion frames borrow windows of them through
/// [`Section`] instead of re-parsing.
#[derive(Debug, Clone, Default)]
pub struct DiffData {
    data: Bytes,
    atoms: Vec<Atom>,
}

impl DiffData {
    pub fn new(data: Bytes) -> Self {
        DiffData {
            data,
            atoms: Vec::new(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A cheap handle on the underlying buffer.
    pub fn share_data(&self) -> Bytes {
        self.data.clone()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn set_atoms(&mut self, atoms: Vec<Atom>) {
        self.atoms = atoms;
    }

    /// The bytes of the atom at the given global index.
    pub fn atom_bytes(&self, index: usize) -> &[u8] {
        let atom = &self.atoms[index];
        &self.data[atom.at..atom.at + atom.len]
    }
}

/// A borrowed, contiguous window of a root's atoms.
///
/// Recursive diff frames operate on sections instead of owning data.
/// `start` is the global atom index of the window's first atom, so a local
/// index within the section and the global index in the root differ by the
/// fixed offset `start`.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    root: &'a DiffData,
    start: usize,
    len: usize,
}

impl<'a> Section<'a> {
    pub fn new(root: &'a DiffData, start: usize, len: usize) -> Self {
        debug_assert!(start + len <= root.atoms().len());
        Section { root, start, len }
    }

    /// A section spanning every atom of the root.
    pub fn whole(root: &'a DiffData) -> Self {
        Section {
            root,
            start: 0,
            len: root.atoms().len(),
        }
    }

    pub fn root(&self) -> &'a DiffData {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Converts a local atom index to the global index in the root.
    pub fn global(&self, local: usize) -> usize {
        self.start + local
    }

    pub fn atom(&self, local: usize) -> &'a Atom {
        &self.root.atoms()[self.start + local]
    }

    pub fn atom_bytes(&self, local: usize) -> &'a [u8] {
        let atom = self.atom(local);
        &self.root.data()[atom.at..atom.at + atom.len]
    }
}

/// Whether the atoms at `left[i]` and `right[j]` hold identical content.
pub fn same_atom(left: &Section<'_>, i: usize, right: &Section<'_>, j: usize) -> bool {
    let a = left.atom(i);
    let b = right.atom(j);
    a.hash == b.hash && a.len == b.len && left.atom_bytes(i) == right.atom_bytes(j)
}
