use libsais::ThreadCount;

/// Builds the suffix array of `text` over the raw byte alphabet.
///
/// The sentinels of the subject string are ASCII-smaller than every residue,
/// so no alphabet translation is necessary.
pub(crate) fn suffix_array(text: &[u8]) -> Vec<i32> {
    let mut buffer = vec![0i32; text.len()];

    libsais::SuffixArrayConstruction::for_text(text)
        .in_borrowed_buffer(&mut buffer)
        .multi_threaded(ThreadCount::fixed(
            rayon::current_num_threads()
                .try_into()
                .expect("Number of threads should fit into u16"),
        ))
        .run()
        .expect("libsais suffix array construction");

    buffer
}

pub(crate) fn inverse(suffix_array: &[i32]) -> Vec<i32> {
    let mut inverse = vec![0i32; suffix_array.len()];

    for (rank, &position) in suffix_array.iter().enumerate() {
        inverse[position as usize] = rank as i32;
    }

    inverse
}

/// Kasai's algorithm. `lcp[rank]` is the longest common prefix of the
/// suffixes at `rank - 1` and `rank`; both ends carry a -1 sentinel.
pub(crate) fn lcp_kasai(text: &[u8], suffix_array: &[i32], inverse: &[i32]) -> Vec<i32> {
    let n = text.len();
    let mut lcp = vec![0i32; n + 1];
    lcp[0] = -1;
    lcp[n] = -1;

    let mut common = 0usize;

    for position in 0..n {
        let rank = inverse[position] as usize;

        if rank == 0 {
            common = 0;
            continue;
        }

        let previous = suffix_array[rank - 1] as usize;
        while position + common < n
            && previous + common < n
            && text[position + common] == text[previous + common]
        {
            common += 1;
        }

        lcp[rank] = common as i32;
        common = common.saturating_sub(1);
    }

    lcp
}
