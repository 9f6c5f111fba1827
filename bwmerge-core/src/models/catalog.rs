use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// A chromosome name and length as reported natively by one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromSize {
    pub name: String,
    pub length: u32,
}

impl ChromSize {
    pub fn new(name: &str, length: u32) -> Self {
        ChromSize {
            name: name.to_string(),
            length,
        }
    }
}

/// One chromosome of the unified catalog, together with the inputs that contain it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeEntry {
    pub name: String,
    /// Length reported by the first input that listed this chromosome.
    pub length: u32,
    /// Index of the input the length was taken from.
    pub first_input: usize,
    /// Length each containing input reports for this chromosome, keyed by input index.
    presence: BTreeMap<usize, u32>,
}

impl ChromosomeEntry {
    fn new(name: &str, length: u32, input: usize) -> Self {
        ChromosomeEntry {
            name: name.to_string(),
            length,
            first_input: input,
            presence: BTreeMap::from([(input, length)]),
        }
    }

    /// Whether the input at `input` lists this chromosome.
    pub fn contains(&self, input: usize) -> bool {
        self.presence.contains_key(&input)
    }

    /// Length reported by `input` itself, which may differ from the catalog length.
    pub fn length_in(&self, input: usize) -> Option<u32> {
        self.presence.get(&input).copied()
    }

    /// Indices of the inputs that list this chromosome, ascending.
    pub fn inputs(&self) -> impl Iterator<Item = usize> + '_ {
        self.presence.keys().copied()
    }

    pub fn num_inputs(&self) -> usize {
        self.presence.len()
    }
}

/// Two inputs disagree on the length of a chromosome. The catalog keeps `recorded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthConflict {
    pub chrom: String,
    pub first_input: usize,
    pub recorded: u32,
    pub input: usize,
    pub reported: u32,
}

/// Every chromosome seen across the inputs, keyed and iterated by name (byte order).
#[derive(Debug, Clone, Default)]
pub struct ChromosomeCatalog {
    entries: BTreeMap<String, ChromosomeEntry>,
    conflicts: Vec<LengthConflict>,
    num_inputs: usize,
}

impl ChromosomeCatalog {
    ///
    /// Build a catalog from the chromosome lists of each input, in input order.
    ///
    /// The first input to list a chromosome fixes its length; later inputs only add
    /// themselves to its presence set. A later input reporting another length is kept
    /// as a [`LengthConflict`].
    ///
    pub fn from_chrom_lists<'a, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'a [ChromSize]>,
    {
        let mut catalog = ChromosomeCatalog::default();
        for (input, chroms) in lists.into_iter().enumerate() {
            catalog.num_inputs = input + 1;
            for chrom in chroms {
                catalog.observe(input, chrom);
            }
        }
        catalog
    }

    fn observe(&mut self, input: usize, chrom: &ChromSize) {
        match self.entries.entry(chrom.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(ChromosomeEntry::new(&chrom.name, chrom.length, input));
            }
            Entry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                if entry.length != chrom.length && !entry.contains(input) {
                    self.conflicts.push(LengthConflict {
                        chrom: chrom.name.clone(),
                        first_input: entry.first_input,
                        recorded: entry.length,
                        input,
                        reported: chrom.length,
                    });
                }
                entry.presence.entry(input).or_insert(chrom.length);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inputs the catalog was reconciled from.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn get(&self, name: &str) -> Option<&ChromosomeEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChromosomeEntry> {
        self.entries.values()
    }

    pub fn conflicts(&self) -> &[LengthConflict] {
        &self.conflicts
    }

    /// Names of the chromosomes a given input contributes to.
    pub fn chroms_for_input(&self, input: usize) -> Vec<&str> {
        self.entries
            .values()
            .filter(|e| e.contains(input))
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Chromosome sizes in the form expected by track writers.
    pub fn chrom_sizes(&self) -> HashMap<String, u32> {
        self.entries
            .values()
            .map(|e| (e.name.clone(), e.length))
            .collect()
    }
}
