//! Character-level diffing between two text runs.
//!
//! Myers O(ND) over Unicode scalar values, with the usual front: common
//! prefix and suffix are trimmed before the search, the edit script is
//! coalesced into maximal blocks, and short equalities wedged between
//! edits are absorbed so word replacements come out whole instead of as
//! character confetti.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOp {
    Equal,
    Insert,
    Delete,
}

/// A maximal run of one edit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffBlock {
    pub op: BlockOp,
    pub text: String,
}

impl DiffBlock {
    fn new(op: BlockOp, text: impl Into<String>) -> Self {
        DiffBlock {
            op,
            text: text.into(),
        }
    }

    /// Length in characters, the unit every diff offset counts in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Diff two strings into equal/insert/delete blocks.
///
/// Concatenating equal and delete blocks yields `old`; equal and insert
/// blocks yield `new`.
pub fn diff_chars(old: &str, new: &str) -> Vec<DiffBlock> {
    if old == new {
        if old.is_empty() {
            return Vec::new();
        }
        return vec![DiffBlock::new(BlockOp::Equal, old)];
    }

    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();

    let prefix = common_prefix(&old_chars, &new_chars);
    let suffix = common_suffix(&old_chars[prefix..], &new_chars[prefix..]);

    let old_mid = &old_chars[prefix..old_chars.len() - suffix];
    let new_mid = &new_chars[prefix..new_chars.len() - suffix];

    let mut blocks = Vec::new();
    if prefix > 0 {
        let text: String = old_chars[..prefix].iter().collect();
        blocks.push(DiffBlock::new(BlockOp::Equal, text));
    }
    blocks.extend(myers(old_mid, new_mid));
    if suffix > 0 {
        let text: String = old_chars[old_chars.len() - suffix..].iter().collect();
        blocks.push(DiffBlock::new(BlockOp::Equal, text));
    }

    semantic_cleanup(coalesce(blocks))
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Greedy O(ND) edit-path search.
fn myers(old: &[char], new: &[char]) -> Vec<DiffBlock> {
    if old.is_empty() && new.is_empty() {
        return Vec::new();
    }
    if old.is_empty() {
        return vec![DiffBlock::new(BlockOp::Insert, new.iter().collect::<String>())];
    }
    if new.is_empty() {
        return vec![DiffBlock::new(BlockOp::Delete, old.iter().collect::<String>())];
    }

    let (d_final, trace) = forward_search(old, new);
    backtrack(old, new, &trace, d_final)
}

/// Run the forward search, recording the furthest-x state per round for
/// the backtrack. Returns the round on which the end was reached.
fn forward_search(old: &[char], new: &[char]) -> (usize, Vec<Vec<isize>>) {
    let n = old.len() as isize;
    let m = new.len() as isize;
    let offset = n + m;
    let max = (n + m) as usize;

    let mut v = vec![0isize; 2 * max + 1];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    for d in 0..=(max as isize) {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let idx = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && old[x as usize] == new[y as usize] {
                x += 1;
                y += 1;
            }
            v[idx] = x;
            if x >= n && y >= m {
                return (d as usize, trace);
            }
            k += 2;
        }
    }

    // d = n + m deletes everything and inserts everything, so the search
    // cannot actually fall through to here.
    (max, trace)
}

fn backtrack(old: &[char], new: &[char], trace: &[Vec<isize>], d_final: usize) -> Vec<DiffBlock> {
    let n = old.len() as isize;
    let m = new.len() as isize;
    let offset = n + m;

    // collected back-to-front, one char per step
    let mut steps: Vec<(BlockOp, char)> = Vec::new();
    let mut x = n;
    let mut y = m;

    for d in (1..=d_final).rev() {
        let v = &trace[d];
        let k = x - y;
        let idx = (k + offset) as usize;
        let down = k == -(d as isize) || (k != d as isize && v[idx - 1] < v[idx + 1]);
        let prev_k = if down { k + 1 } else { k - 1 };
        let prev_x = v[(prev_k + offset) as usize];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
            steps.push((BlockOp::Equal, old[x as usize]));
        }
        if down {
            y -= 1;
            steps.push((BlockOp::Insert, new[y as usize]));
        } else {
            x -= 1;
            steps.push((BlockOp::Delete, old[x as usize]));
        }
    }
    while x > 0 && y > 0 {
        x -= 1;
        y -= 1;
        steps.push((BlockOp::Equal, old[x as usize]));
    }

    steps.reverse();
    let mut blocks: Vec<DiffBlock> = Vec::new();
    for (op, ch) in steps {
        match blocks.last_mut() {
            Some(last) if last.op == op => last.text.push(ch),
            _ => blocks.push(DiffBlock::new(op, ch.to_string())),
        }
    }
    blocks
}

/// Merge adjacent blocks of the same operation, drop empties, and order
/// each edit group as delete-then-insert.
fn coalesce(blocks: Vec<DiffBlock>) -> Vec<DiffBlock> {
    fn flush(out: &mut Vec<DiffBlock>, deletes: &mut String, inserts: &mut String) {
        if !deletes.is_empty() {
            out.push(DiffBlock::new(BlockOp::Delete, std::mem::take(deletes)));
        }
        if !inserts.is_empty() {
            out.push(DiffBlock::new(BlockOp::Insert, std::mem::take(inserts)));
        }
    }

    let mut out: Vec<DiffBlock> = Vec::new();
    let mut deletes = String::new();
    let mut inserts = String::new();

    for block in blocks {
        match block.op {
            BlockOp::Equal => {
                if block.text.is_empty() {
                    continue;
                }
                flush(&mut out, &mut deletes, &mut inserts);
                match out.last_mut() {
                    Some(last) if last.op == BlockOp::Equal => last.text.push_str(&block.text),
                    _ => out.push(block),
                }
            }
            BlockOp::Delete => deletes.push_str(&block.text),
            BlockOp::Insert => inserts.push_str(&block.text),
        }
    }
    flush(&mut out, &mut deletes, &mut inserts);
    out
}

/// Absorb equalities no longer than the edit runs on both sides, so a
/// replaced word does not survive as stray matched characters.
fn semantic_cleanup(mut blocks: Vec<DiffBlock>) -> Vec<DiffBlock> {
    loop {
        let Some(target) = find_absorbable_equality(&blocks) else {
            return blocks;
        };
        let text = blocks[target].text.clone();
        blocks.splice(
            target..=target,
            [
                DiffBlock::new(BlockOp::Delete, text.clone()),
                DiffBlock::new(BlockOp::Insert, text),
            ],
        );
        blocks = coalesce(blocks);
    }
}

fn find_absorbable_equality(blocks: &[DiffBlock]) -> Option<usize> {
    for i in 1..blocks.len().saturating_sub(1) {
        if blocks[i].op != BlockOp::Equal {
            continue;
        }
        let eq_len = blocks[i].char_len();
        if eq_len <= edit_weight(blocks[..i].iter().rev())
            && eq_len <= edit_weight(blocks[i + 1..].iter())
        {
            return Some(i);
        }
    }
    None
}

/// Max of the delete and insert char counts in the edit run adjacent to
/// an equality. Zero when the neighboring block is another equality.
fn edit_weight<'a>(run: impl Iterator<Item = &'a DiffBlock>) -> usize {
    let mut deletes = 0;
    let mut inserts = 0;
    for block in run {
        match block.op {
            BlockOp::Delete => deletes += block.char_len(),
            BlockOp::Insert => inserts += block.char_len(),
            BlockOp::Equal => break,
        }
    }
    deletes.max(inserts)
}
